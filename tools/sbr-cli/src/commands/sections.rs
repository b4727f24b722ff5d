//! List landing page sections.

use anyhow::Result;
use sbr_landing::{header_is_scrolled, scroll_target, Section};
use serde_json::json;

use super::SectionsArgs;
use crate::context::Context;

/// Run the sections command.
pub async fn run(args: SectionsArgs, ctx: &Context) -> Result<()> {
    let target = args
        .goto
        .as_deref()
        .map(Section::from_id)
        .transpose()?
        .map(|section| (section, scroll_target(args.element_top, args.scroll_y)));
    let compact = header_is_scrolled(args.scroll_y);

    if ctx.output.is_json() {
        let sections: Vec<_> = Section::ALL
            .iter()
            .map(|s| json!({ "id": s.id(), "title": s.title(), "subtitle": s.subtitle() }))
            .collect();
        ctx.output.json(&json!({
            "sections": sections,
            "header_scrolled": compact,
            "scroll_target": target.map(|(s, top)| json!({ "section": s.id(), "top": top })),
        }));
        return Ok(());
    }

    ctx.output.header("Sections");
    for section in Section::ALL {
        ctx.output
            .table_row(&[&section.anchor(), section.title(), section.subtitle()], &[16, 24, 20]);
    }

    ctx.output.info("");
    ctx.output.kv(
        "header",
        if compact { "scrolled (compact)" } else { "at top (transparent)" },
    );
    if let Some((section, top)) = target {
        ctx.output.kv(&format!("scroll to {}", section.anchor()), &format!("{}px", top));
    }

    Ok(())
}
