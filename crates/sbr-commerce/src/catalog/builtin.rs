//! The catalog shipped with the site.

use crate::catalog::{
    BusinessKind, BusinessProduct, Catalog, EventCategory, EventPackage, PrivateProduct,
    SizeOption,
};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

fn chf(minor_units: i64) -> Money {
    Money::new(minor_units, Currency::CHF)
}

fn bottle(id: &str, name: &str, description: &str, image: &str, prices: [i64; 3]) -> PrivateProduct {
    PrivateProduct {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        sizes: ["250ml", "500ml", "750ml"]
            .iter()
            .zip(prices)
            .map(|(size, price)| SizeOption::new(*size, chf(price)))
            .collect(),
    }
}

fn pallet(id: &str, name: &str, description: &str, price: i64) -> BusinessProduct {
    BusinessProduct {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        kind: BusinessKind::Pallet,
        price: chf(price),
        unit: "per pallet (144 bottles)".to_string(),
        min_order: None,
    }
}

fn package(
    id: &str,
    name: &str,
    description: &str,
    category: EventCategory,
    image: &str,
    price: i64,
    includes: &[&str],
) -> EventPackage {
    EventPackage {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        category,
        image: image.to_string(),
        base_price: chf(price),
        includes: includes.iter().map(|s| s.to_string()).collect(),
    }
}

pub(super) fn builtin() -> Catalog {
    let private = vec![
        bottle(
            "pure-spring",
            "Pure Spring",
            "Untouched purity from the heart of the Alps",
            "/pure-spring-removebg-preview.png",
            [250, 450, 650],
        ),
        bottle(
            "sparkling-crest",
            "Sparkling Crest",
            "Natural effervescence, refined elegance",
            "/sparkling-crest-removebg-preview.png",
            [280, 500, 700],
        ),
        bottle(
            "alpine-burst",
            "Alpine Burst",
            "Bold personality, superior intensity",
            "/alpine-burst-removebg-preview.png",
            [300, 550, 750],
        ),
    ];

    let business = vec![
        BusinessProduct {
            id: ProductId::new("monthly-furnishing"),
            name: "Monthly Furnishing".to_string(),
            description: "Regular monthly delivery of Alpine waters for your office".to_string(),
            kind: BusinessKind::Monthly,
            price: chf(45_000),
            unit: "per month".to_string(),
            min_order: Some(50),
        },
        pallet(
            "pallet-pure-spring",
            "Pallet - Pure Spring",
            "Bulk order of Pure Spring water",
            120_000,
        ),
        pallet(
            "pallet-sparkling-crest",
            "Pallet - Sparkling Crest",
            "Bulk order of Sparkling Crest water",
            135_000,
        ),
        pallet(
            "pallet-alpine-burst",
            "Pallet - Alpine Burst",
            "Bulk order of Alpine Burst water",
            150_000,
        ),
        pallet(
            "mixed-pallet",
            "Mixed Pallet",
            "Custom mixed pallet with all three varieties",
            135_000,
        ),
    ];

    let events = vec![
        package(
            "work-event-basic",
            "Work Event - Basic",
            "Professional water service for corporate events",
            EventCategory::Work,
            "https://ext.same-assets.com/1656755911/4129149451.jpeg",
            25_000,
            &[
                "Water stations setup",
                "500ml bottles (50 units)",
                "Professional service staff",
                "Cleanup service",
            ],
        ),
        package(
            "work-event-premium",
            "Work Event - Premium",
            "Premium water service for important corporate gatherings",
            EventCategory::Work,
            "https://ext.same-assets.com/1656755911/515093026.jpeg",
            50_000,
            &[
                "Premium water stations",
                "750ml bottles (100 units)",
                "Dedicated service staff",
                "Branded presentation",
                "Cleanup service",
            ],
        ),
        package(
            "cultural-event-basic",
            "Cultural Event - Basic",
            "Elegant water service for cultural gatherings",
            EventCategory::Cultural,
            "https://ext.same-assets.com/1656755911/3649516832.jpeg",
            30_000,
            &[
                "Elegant water stations",
                "Glass bottles (60 units)",
                "Service staff",
                "Event coordination",
            ],
        ),
        package(
            "cultural-event-premium",
            "Cultural Event - Premium",
            "Premium water experience for cultural events",
            EventCategory::Cultural,
            "https://ext.same-assets.com/1656755911/2667005913.jpeg",
            60_000,
            &[
                "Premium water stations",
                "Glass bottles (120 units)",
                "Dedicated service team",
                "Custom branding",
                "Event coordination",
            ],
        ),
        package(
            "party-basic",
            "Party - Basic",
            "Fun water service for parties and celebrations",
            EventCategory::Party,
            "https://ext.same-assets.com/1656755911/4227031535.jpeg",
            20_000,
            &[
                "Water stations",
                "500ml bottles (40 units)",
                "Basic service",
                "Cleanup",
            ],
        ),
        package(
            "party-premium",
            "Party - Premium",
            "Premium water experience for special celebrations",
            EventCategory::Party,
            "https://ext.same-assets.com/1656755911/971678446.jpeg",
            45_000,
            &[
                "Premium water stations",
                "750ml bottles (80 units)",
                "Service staff",
                "Custom setup",
                "Cleanup service",
            ],
        ),
    ];

    Catalog {
        private,
        business,
        events,
    }
}
