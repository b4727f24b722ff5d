//! Generate background bubbles.

use anyhow::{Context as _, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sbr_landing::BubbleField;

use super::BubblesArgs;
use crate::context::Context;

/// Run the bubbles command.
pub async fn run(args: BubblesArgs, ctx: &Context) -> Result<()> {
    let mut settings = ctx.config.landing.bubbles.clone();
    if let Some(count) = args.count {
        settings.min_count = count;
        settings.max_count = count;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let field = BubbleField::generate(&settings, &mut rng).context("Invalid bubble settings")?;

    if ctx.output.is_json() {
        ctx.output.json(&field);
        return Ok(());
    }

    if args.css {
        for bubble in field.iter() {
            println!("{} /* dot: {} */", bubble.style(), bubble.dot_style());
        }
        return Ok(());
    }

    ctx.output.header(&format!("{} bubbles", field.len()));
    ctx.output
        .table_row(&["left", "size", "delay", "duration", "blur"], &[6, 6, 6, 9, 5]);
    for bubble in field.iter() {
        ctx.output.table_row(
            &[
                &format!("{}%", bubble.left_percent),
                &format!("{}px", bubble.size_px),
                &format!("{}s", bubble.delay_s),
                &format!("{}s", bubble.duration_s),
                &format!("{}px", bubble.blur_px),
            ],
            &[6, 6, 6, 9, 5],
        );
    }

    Ok(())
}
