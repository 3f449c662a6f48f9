//! Product submission commands.

use tracing::info;

use super::Context;

/// List recorded submissions, oldest first.
pub fn list(ctx: &Context) {
    let submissions = ctx.submission_store().list();
    if submissions.is_empty() {
        info!("No product submissions");
        return;
    }

    for stored in &submissions {
        let s = &stored.submission;
        let new_category = if s.is_new_category() { " (new category)" } else { "" };
        info!(
            "{}  {} - {} [{}{new_category}] {}",
            stored.submission_date.format("%Y-%m-%d %H:%M"),
            s.product_name,
            s.team_name,
            s.category,
            s.price
        );
    }
    info!(count = submissions.len(), "Listed submissions");
}

/// Delete all recorded submissions.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn clear(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.submission_store().clear()?;
    info!("All product submissions deleted");
    Ok(())
}
