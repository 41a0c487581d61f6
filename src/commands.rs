//! One-shot CLI commands: `analyze` and `history`.
//!
//! Both print plain text to stdout. `analyze` runs the same submit/settle
//! cycle as the TUI through [`coordinator::analyze_once`], so the resulting
//! display state is identical.

use std::io::{self, Write};

use log::{info, warn};

use crate::api::{AnalysisResult, HttpAnalysisClient};
use crate::coordinator;
use crate::core::config::ResolvedConfig;
use crate::core::render::render;
use crate::core::state::{App, DisplayState, FormInput};

const WRAP_WIDTH: usize = 78;

/// Analyzes one review. Returns `Ok(false)` when the review was rejected or
/// the analysis failed.
pub async fn analyze(config: &ResolvedConfig, product: String, review: String) -> io::Result<bool> {
    let input = FormInput::new(product, review);
    if !input.is_submittable() {
        eprintln!("Both a product name and review text are required.");
        return Ok(false);
    }

    let client = HttpAnalysisClient::new(config.base_url.clone());
    let mut app = App::from_config(config);
    if !input.meets_length_hint(app.min_review_chars) {
        info!(
            "Review is shorter than {} characters, sending anyway",
            app.min_review_chars
        );
    }

    let display = coordinator::analyze_once(&mut app, &client, input).await;
    let mut out = io::stdout().lock();
    match display {
        DisplayState::Result { payload } => {
            write_result(&mut out, payload)?;
            Ok(true)
        }
        DisplayState::Error { message } => {
            eprintln!("{}", message);
            Ok(false)
        }
        // analyze_once always settles the request it submits
        DisplayState::Idle | DisplayState::Loading => Ok(false),
    }
}

/// Prints every stored analysis, newest first as the backend returns them.
pub async fn history(config: &ResolvedConfig) -> io::Result<()> {
    let client = HttpAnalysisClient::new(config.base_url.clone());
    let reviews = client.list_reviews().await.map_err(|e| {
        warn!("Listing reviews failed: {}", e);
        io::Error::other(e)
    })?;

    let mut out = io::stdout().lock();
    if reviews.is_empty() {
        writeln!(out, "No reviews analyzed yet.")?;
        return Ok(());
    }
    for (i, review) in reviews.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_history_entry(&mut out, review)?;
    }
    Ok(())
}

fn write_result(out: &mut impl Write, payload: &AnalysisResult) -> io::Result<()> {
    let breakdown = render(payload);
    writeln!(out, "Sentiment: {}", breakdown.sentiment_label)?;
    if let Some(id) = payload.id {
        match payload.created_at_display() {
            Some(ts) => writeln!(out, "Saved as review #{} ({})", id, ts)?,
            None => writeln!(out, "Saved as review #{}", id)?,
        }
    }
    writeln!(out, "Key points:")?;
    write_points(out, &breakdown.points)
}

fn write_history_entry(out: &mut impl Write, review: &AnalysisResult) -> io::Result<()> {
    let breakdown = render(review);
    let id = review
        .id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "#?".to_string());
    let product = review.product_name.as_deref().unwrap_or("(unnamed product)");
    write!(out, "{} [{}] {}", id, breakdown.sentiment_label, product)?;
    if let Some(ts) = review.created_at_display() {
        write!(out, " - {}", ts)?;
    }
    writeln!(out)?;
    write_points(out, &breakdown.points)
}

fn write_points(out: &mut impl Write, points: &[String]) -> io::Result<()> {
    if points.is_empty() {
        return writeln!(out, "  No key points returned.");
    }
    let options = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent("  - ")
        .subsequent_indent("    ");
    for point in points {
        writeln!(out, "{}", textwrap::fill(point, &options))?;
    }
    Ok(())
}
