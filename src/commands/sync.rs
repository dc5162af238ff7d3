use crate::context::AppContext;
use crate::error::AppResult;

pub fn run(ctx: &AppContext) -> AppResult<()> {
    let report = ctx.sync_routing(&ctx.store.accounts)?;
    ctx.output.emit(&super::describe_report(&report), &report)
}
