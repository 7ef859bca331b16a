//! Plan state transitions and completion counting.
//!
//! Every transition checks the plan's state before touching a field, so a
//! rejected call leaves the plan exactly as it was.

use crate::{
    error::{CadenceError, Result},
    models::Plan,
};

/// Outcome of crediting a plan with one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credit {
    /// The completion reached the lifetime target and ended the plan
    pub ended: bool,
}

fn credit(plan: &mut Plan) -> Credit {
    plan.cycle_count = plan.cycle_count.saturating_add(1);
    plan.lifetime_count = plan.lifetime_count.saturating_add(1);
    let ended = deactivate_if_reached(plan);
    Credit { ended }
}

/// Deactivate the plan when its lifetime target has been reached.
fn deactivate_if_reached(plan: &mut Plan) -> bool {
    if plan.active && plan.lifetime_reached() {
        plan.active = false;
        return true;
    }
    false
}

/// Record one completion made directly on the plan.
pub fn complete_once(plan: &mut Plan) -> Result<Credit> {
    if !plan.active {
        return Err(CadenceError::invalid_state(
            plan.id,
            plan.state(),
            "complete",
        ));
    }
    Ok(credit(plan))
}

/// Record one completion that came from finishing a spawned task.
///
/// Returns `None` when the plan is no longer active; the task still counts
/// as done but the plan is not credited.
pub fn complete_via_task(plan: &mut Plan) -> Option<Credit> {
    plan.active.then(|| credit(plan))
}

/// Pause or resume a plan. Returns whether anything changed.
pub fn set_active(plan: &mut Plan, active: bool) -> Result<bool> {
    if plan.is_ended() {
        let action = if active { "resume" } else { "pause" };
        return Err(CadenceError::invalid_state(plan.id, plan.state(), action));
    }
    if plan.active == active {
        return Ok(false);
    }
    plan.active = active;
    Ok(true)
}

/// End a plan for good, freezing the lifetime target at the current count.
pub fn end_permanently(plan: &mut Plan) -> Result<()> {
    if plan.is_ended() {
        return Err(CadenceError::invalid_state(plan.id, plan.state(), "end"));
    }
    plan.active = false;
    plan.lifetime_target = Some(plan.lifetime_count);
    Ok(())
}

/// Replace the lifetime target.
///
/// Ended plans keep their target. Lowering the target of an active or
/// paused plan to or below its lifetime count ends it; the returned flag
/// says so.
pub fn set_lifetime_target(plan: &mut Plan, target: Option<u32>) -> Result<bool> {
    if plan.lifetime_target == target {
        return Ok(false);
    }
    if plan.is_ended() {
        return Err(CadenceError::invalid_state(
            plan.id,
            plan.state(),
            "change the lifetime target of",
        ));
    }
    plan.lifetime_target = target;
    deactivate_if_reached(plan);
    Ok(plan.is_ended())
}
