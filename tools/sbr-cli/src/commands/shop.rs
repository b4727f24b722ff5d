//! Run a shop session.
//!
//! A session is a list of steps, taken either from a script or from
//! `--add` arguments. Script syntax, one step per line (`#` starts a comment):
//!
//! ```text
//! category business
//! add pallet-pure-spring 2
//! category private
//! select pure-spring
//! size 500ml
//! qty 3
//! add
//! update pure-spring-500ml 4
//! remove pure-spring-500ml
//! filter party
//! checkout
//! close
//! open
//! ```

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, bail, Context as _, Result};
use dialoguer::Confirm;
use sbr_commerce::prelude::*;
use sbr_observability::{LogWriter, StructuredLogger};
use serde::Serialize;

use super::ShopArgs;
use crate::context::Context;

/// One shopper action.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Category(PurchaseCategory),
    Select(ProductId),
    Size(String),
    Quantity(i64),
    Increment,
    Decrement,
    AddSelected,
    Add { product: ProductId, quantity: i64 },
    Update { line: LineItemId, quantity: i64 },
    Remove(LineItemId),
    Filter(EventFilter),
    Checkout,
    Open,
    Close,
}

/// A step and where it came from, for error messages.
#[derive(Debug, Clone, PartialEq)]
struct PlannedStep {
    origin: String,
    step: Step,
}

#[derive(Debug, Serialize)]
struct CheckoutRecord {
    outcome: CheckoutOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_url: Option<String>,
}

#[derive(Serialize)]
struct ShopReport {
    notifications: Vec<Notification>,
    checkouts: Vec<CheckoutRecord>,
    cart: Option<Cart>,
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let plan = plan(&args)?;
    let mut session = ShopSession::new(ctx, !args.yes, LogWriter::Stderr)?;

    for planned in plan {
        session
            .apply(&planned)
            .await
            .with_context(|| format!("Step failed at {}", planned.origin))?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&ShopReport {
            cart: session.modal.cart(),
            notifications: session.notifications,
            checkouts: session.checkouts,
        });
    } else if let Some(cart) = session.modal.cart() {
        if !cart.is_empty() {
            print_cart(ctx, &cart);
        }
    }

    Ok(())
}

/// Turn the command arguments into steps.
fn plan(args: &ShopArgs) -> Result<Vec<PlannedStep>> {
    if let Some(script) = &args.script {
        let text = if script == "-" {
            std::io::read_to_string(std::io::stdin()).context("Failed to read script from stdin")?
        } else {
            std::fs::read_to_string(script)
                .with_context(|| format!("Failed to read script: {}", script))?
        };
        return parse_script(&text);
    }

    if args.add.is_empty() {
        bail!("Nothing to do: pass --script or at least one --add");
    }

    let mut steps = vec![PlannedStep {
        origin: "--category".to_string(),
        step: Step::Category(args.category),
    }];
    for spec in &args.add {
        for step in parse_add_spec(args.category, spec)? {
            steps.push(PlannedStep {
                origin: format!("--add {}", spec),
                step,
            });
        }
    }
    if !args.no_checkout {
        steps.push(PlannedStep {
            origin: "checkout".to_string(),
            step: Step::Checkout,
        });
    }
    Ok(steps)
}

fn parse_script(text: &str) -> Result<Vec<PlannedStep>> {
    let mut steps = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let origin = format!("line {}", index + 1);
        if let Some(step) = parse_step(line).with_context(|| origin.clone())? {
            steps.push(PlannedStep { origin, step });
        }
    }
    Ok(steps)
}

/// Parse one script line. Blank lines and comments yield `None`.
fn parse_step(line: &str) -> Result<Option<Step>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let step = match (verb, args.as_slice()) {
        ("category", [name]) => Step::Category(
            name.parse::<PurchaseCategory>()
                .map_err(|_| anyhow!("unknown purchase category '{}'", name))?,
        ),
        ("select" | "product", [id]) => Step::Select(ProductId::new(*id)),
        ("size", [size]) => Step::Size(size.to_string()),
        ("qty" | "quantity", [n]) => Step::Quantity(parse_quantity(n)?),
        ("inc", []) => Step::Increment,
        ("dec", []) => Step::Decrement,
        ("add", []) => Step::AddSelected,
        ("add", [id]) => Step::Add {
            product: ProductId::new(*id),
            quantity: 1,
        },
        ("add", [id, n]) => Step::Add {
            product: ProductId::new(*id),
            quantity: parse_quantity(n)?,
        },
        ("update", [line, n]) => Step::Update {
            line: LineItemId::new(*line),
            quantity: parse_quantity(n)?,
        },
        ("remove", [line]) => Step::Remove(LineItemId::new(*line)),
        ("filter", [name]) => Step::Filter(parse_filter(name)?),
        ("checkout", []) => Step::Checkout,
        ("open", []) => Step::Open,
        ("close", []) => Step::Close,
        _ => bail!("unrecognised step '{}'", line),
    };
    Ok(Some(step))
}

/// Parse `product:size[:qty]` for waters, `product[:qty]` for everything else.
fn parse_add_spec(category: PurchaseCategory, spec: &str) -> Result<Vec<Step>> {
    let parts: Vec<&str> = spec.split(':').collect();
    match (category, parts.as_slice()) {
        (PurchaseCategory::Private, [product, size]) => Ok(vec![
            Step::Select(ProductId::new(*product)),
            Step::Size(size.to_string()),
            Step::AddSelected,
        ]),
        (PurchaseCategory::Private, [product, size, n]) => Ok(vec![
            Step::Select(ProductId::new(*product)),
            Step::Size(size.to_string()),
            Step::Quantity(parse_quantity(n)?),
            Step::AddSelected,
        ]),
        (PurchaseCategory::Private, _) => {
            bail!("Invalid item '{}': expected product:size[:qty]", spec)
        }
        (_, [product]) => Ok(vec![Step::Add {
            product: ProductId::new(*product),
            quantity: 1,
        }]),
        (_, [product, n]) => Ok(vec![Step::Add {
            product: ProductId::new(*product),
            quantity: parse_quantity(n)?,
        }]),
        _ => bail!("Invalid item '{}': expected product[:qty]", spec),
    }
}

fn parse_quantity(s: &str) -> Result<i64> {
    let quantity: i64 = s
        .parse()
        .map_err(|_| anyhow!("invalid quantity '{}'", s))?;
    if quantity < 1 {
        bail!("quantity must be at least 1, got {}", quantity);
    }
    Ok(quantity)
}

fn parse_filter(s: &str) -> Result<EventFilter> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(EventFilter::All);
    }
    s.parse::<EventCategory>()
        .map(EventFilter::Only)
        .map_err(|_| anyhow!("unknown event type '{}'", s))
}

/// The modal plus everything a run collects.
struct ShopSession<'a> {
    ctx: &'a Context,
    modal: ShopModal,
    sink: Arc<MemorySink>,
    redirect: Arc<LinkRedirect>,
    logger: StructuredLogger,
    confirm: bool,
    notifications: Vec<Notification>,
    checkouts: Vec<CheckoutRecord>,
}

impl<'a> ShopSession<'a> {
    fn new(ctx: &'a Context, confirm: bool, writer: LogWriter) -> Result<Self> {
        let sink = Arc::new(MemorySink::new());
        let redirect = Arc::new(LinkRedirect::new(
            ctx.config.shop.hosted_checkout_url.as_str(),
        ));
        let modal = ctx.shop_modal(redirect.clone(), sink.clone())?;
        modal.open();

        let session_id = modal
            .cart()
            .map(|cart| cart.id.to_string())
            .unwrap_or_default();
        let logging = &ctx.config.logging;
        let logger = StructuredLogger::new(session_id)
            .with_component("shop")
            .with_min_level(logging.level)
            .with_format(logging.format)
            .with_filter(logging.suppress_filter())
            .with_writer(writer);

        Ok(Self {
            ctx,
            modal,
            sink,
            redirect,
            logger,
            confirm,
            notifications: Vec::new(),
            checkouts: Vec::new(),
        })
    }

    async fn apply(&mut self, planned: &PlannedStep) -> Result<()> {
        self.logger
            .debug_builder("step")
            .field("origin", planned.origin.as_str())
            .field("step", format!("{:?}", planned.step))
            .emit();

        match &planned.step {
            Step::Checkout => self.checkout().await?,
            Step::Open => self.modal.open(),
            Step::Close => self.modal.close(),
            step => {
                if let Err(e) = apply_cart_step(&self.modal, step) {
                    self.ctx
                        .output
                        .warn(&format!("{}: {}", planned.origin, e));
                    self.logger
                        .warn_builder("step rejected")
                        .field("origin", planned.origin.as_str())
                        .field("error", e.to_string())
                        .emit();
                }
            }
        }

        for notification in self.sink.drain() {
            self.ctx.output.notification(&notification);
            self.notifications.push(notification);
        }
        Ok(())
    }

    async fn checkout(&mut self) -> Result<()> {
        let has_items = match self.modal.cart() {
            Some(cart) if !cart.is_empty() => {
                print_cart(self.ctx, &cart);
                true
            }
            _ => false,
        };

        if self.confirm && has_items && !self.ctx.output.is_json() {
            let confirmed = Confirm::new()
                .with_prompt("Proceed to checkout?")
                .default(true)
                .interact()?;
            if !confirmed {
                self.ctx.output.warn("Checkout cancelled");
                return Ok(());
            }
        }

        let spinner = self.ctx.output.spinner("Creating payment session...");
        let started = Instant::now();
        let outcome = self.modal.checkout().await;
        spinner.finish_and_clear();

        let redirect_url = match &outcome {
            CheckoutOutcome::Redirected { .. } => self.redirect.last_url(),
            _ => None,
        };
        self.report(&outcome, redirect_url.as_deref());
        self.logger
            .info_builder("checkout finished")
            .field("outcome", outcome_name(&outcome))
            .duration_ms("elapsed_ms", started.elapsed())
            .emit();

        self.checkouts.push(CheckoutRecord {
            outcome,
            redirect_url,
        });
        Ok(())
    }

    fn report(&self, outcome: &CheckoutOutcome, redirect_url: Option<&str>) {
        let output = &self.ctx.output;
        match outcome {
            CheckoutOutcome::Redirected { session_id } => {
                output.success("Payment session created");
                output.kv("session", session_id);
                if let Some(url) = redirect_url {
                    output.kv("checkout", url);
                }
            }
            CheckoutOutcome::Simulated(summary) => {
                output.info(&format!(
                    "No payment session available, simulated {} checkout",
                    summary.category.display_name()
                ));
            }
            CheckoutOutcome::Skipped(reason) => {
                let reason = match reason {
                    SkipReason::EmptyCart => "the cart is empty",
                    SkipReason::InFlight => "a checkout is already in progress",
                    SkipReason::Closed => "the shop is closed",
                };
                output.warn(&format!("Checkout skipped: {}", reason));
            }
            CheckoutOutcome::Discarded => {
                output.warn("Checkout response discarded: the shop was closed");
            }
        }
    }
}

fn apply_cart_step(modal: &ShopModal, step: &Step) -> Result<(), CommerceError> {
    match step {
        Step::Category(category) => modal.switch_category(*category),
        Step::Select(product) => modal.select_product(product.clone()),
        Step::Size(size) => modal.select_size(size),
        Step::Quantity(quantity) => modal.set_quantity(*quantity),
        Step::Increment => modal.increment_quantity(),
        Step::Decrement => modal.decrement_quantity(),
        Step::AddSelected => modal.add_selected().map(|_| ()),
        Step::Add { product, quantity } => {
            let current = match modal.add_product(product.clone())? {
                AddOutcome::Added => 1,
                AddOutcome::Incremented { quantity } => quantity,
            };
            if *quantity > 1 {
                modal.update_quantity(&LineItemId::for_product(product), current + quantity - 1);
            }
            Ok(())
        }
        Step::Update { line, quantity } => {
            if !modal.update_quantity(line, *quantity) {
                return Err(CommerceError::ItemNotInCart(line.to_string()));
            }
            Ok(())
        }
        Step::Remove(line) => {
            if !modal.remove_item(line) {
                return Err(CommerceError::ItemNotInCart(line.to_string()));
            }
            Ok(())
        }
        Step::Filter(filter) => modal.filter_events(*filter),
        Step::Checkout | Step::Open | Step::Close => Ok(()),
    }
}

fn outcome_name(outcome: &CheckoutOutcome) -> &'static str {
    match outcome {
        CheckoutOutcome::Redirected { .. } => "redirected",
        CheckoutOutcome::Simulated(_) => "simulated",
        CheckoutOutcome::Skipped(_) => "skipped",
        CheckoutOutcome::Discarded => "discarded",
    }
}

fn print_cart(ctx: &Context, cart: &Cart) {
    ctx.output.header("Cart");
    for item in cart.items() {
        let line_total = item
            .line_total()
            .map(|total| total.display())
            .unwrap_or_else(|e| e.to_string());
        ctx.output.table_row(
            &[&item.label(), &format!("x{}", item.quantity), &line_total],
            &[36, 6, 14],
        );
    }
    match cart.total() {
        Ok(total) => ctx.output.kv("Total", &total.display()),
        Err(e) => ctx.output.warn(&format!("Total unavailable: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;

    fn steps(planned: Vec<PlannedStep>) -> Vec<Step> {
        planned.into_iter().map(|p| p.step).collect()
    }

    #[test]
    fn test_parse_script() {
        let script = "\
# business order
category business
add pallet-pure-spring 2

filter party   # only parties
qty 3
checkout
";
        let planned = parse_script(script).unwrap();
        assert_eq!(planned[0].origin, "line 2");
        assert_eq!(
            steps(planned),
            vec![
                Step::Category(PurchaseCategory::Business),
                Step::Add {
                    product: ProductId::new("pallet-pure-spring"),
                    quantity: 2
                },
                Step::Filter(EventFilter::Only(EventCategory::Party)),
                Step::Quantity(3),
                Step::Checkout,
            ]
        );
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("category private\nqty zero\n").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("line 2"), "{}", message);
        assert!(message.contains("invalid quantity"), "{}", message);

        assert!(parse_script("juggle").is_err());
        assert!(parse_script("qty 0").is_err());
    }

    #[test]
    fn test_parse_add_spec() {
        assert_eq!(
            parse_add_spec(PurchaseCategory::Private, "pure-spring:500ml:3").unwrap(),
            vec![
                Step::Select(ProductId::new("pure-spring")),
                Step::Size("500ml".to_string()),
                Step::Quantity(3),
                Step::AddSelected,
            ]
        );
        assert!(parse_add_spec(PurchaseCategory::Private, "pure-spring").is_err());
        assert_eq!(
            parse_add_spec(PurchaseCategory::Event, "party-basic").unwrap(),
            vec![Step::Add {
                product: ProductId::new("party-basic"),
                quantity: 1
            }]
        );
        assert!(parse_add_spec(PurchaseCategory::Business, "a:b:c").is_err());
    }

    #[test]
    fn test_plan_from_add_arguments() {
        let args = ShopArgs {
            script: None,
            category: PurchaseCategory::Business,
            add: vec!["mixed-pallet:2".to_string()],
            no_checkout: false,
            yes: true,
        };
        let planned = steps(plan(&args).unwrap());
        assert_eq!(planned.first(), Some(&Step::Category(PurchaseCategory::Business)));
        assert_eq!(planned.last(), Some(&Step::Checkout));

        let empty = ShopArgs {
            add: Vec::new(),
            ..args
        };
        assert!(plan(&empty).is_err());
    }

    #[tokio::test]
    async fn test_session_simulates_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
        };
        let (writer, lines) = LogWriter::memory();
        let mut session = ShopSession::new(&ctx, false, writer).unwrap();

        let script = "\
category business
add monthly-furnishing
add pallet-pure-spring 2
add
remove nothing-here
checkout
";
        for planned in parse_script(script).unwrap() {
            session.apply(&planned).await.unwrap();
        }

        assert_eq!(session.checkouts.len(), 1);
        match &session.checkouts[0].outcome {
            CheckoutOutcome::Simulated(summary) => {
                assert_eq!(summary.category, PurchaseCategory::Business);
                assert_eq!(summary.item_count, 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(session
            .notifications
            .iter()
            .any(|n| n.title == "Checkout initiated!"));
        assert!(!session.modal.is_open());

        let lines = lines.lock().unwrap();
        assert!(lines.iter().any(|l| l.contains("step rejected")));
        assert!(lines.iter().any(|l| l.contains("checkout finished")));
    }
}
