//! Dashboard command

use crate::display::{format_dashboard, with_banner};
use crate::error::FinanzResult;
use crate::models::TransactionFilter;
use crate::services::{stats, CategoryService, DashboardStats, TransactionService};

use super::AppContext;

/// Summary figures plus the expense distribution of the fetched transactions
pub fn handle_dashboard_command(ctx: &AppContext) -> FinanzResult<()> {
    let transactions = TransactionService::new(&ctx.client, ctx.fallback());

    let summary = transactions.summary()?;
    let list = transactions.list(&TransactionFilter::default())?;
    let categories = CategoryService::new(&ctx.client, ctx.fallback())
        .list()
        .map(|response| response.data)
        .unwrap_or_default();

    let dashboard = DashboardStats::from_summary(&summary.data);
    let slices = stats::expense_distribution(&list.data, &categories);

    print!(
        "{}",
        with_banner(
            summary.origin,
            format_dashboard(&dashboard, &slices, ctx.symbol())
        )
    );
    Ok(())
}
