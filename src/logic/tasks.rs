//! SUMA task management actions.
//!
//! list, edit, unschedule, delete, config and default each map to a single
//! `suma` invocation. A nonzero exit is fatal.

use tracing::debug;

use super::ModuleContext;
use crate::command_runner::{run_tool, CommandRunner};
use crate::command_traits::ToolArgs;
use crate::commands::suma::SumaTaskArgs;
use crate::error::{Result, SumaError};
use crate::report::RunReport;
use crate::schedule::ScheduleRequest;
use crate::types::Action;

/// Build the `suma` request for a task action.
pub fn task_request(
    action: Action,
    task_id: Option<&str>,
    sched_time: Option<&str>,
) -> Result<SumaTaskArgs> {
    let required_task = || {
        task_id.map(str::to_string).ok_or_else(|| {
            SumaError::config(format!("action is {} but task_id is missing", action))
        })
    };

    let args = match action {
        Action::List => SumaTaskArgs::List(task_id.map(str::to_string)),
        Action::Edit => {
            let task_id = required_task()?;
            let request = ScheduleRequest::from_param(sched_time).map_err(|source| {
                SumaError::Schedule {
                    command: SumaTaskArgs::Schedule {
                        spec: source.0.clone(),
                        task_id: task_id.clone(),
                    }
                    .command_line(),
                    source,
                }
            })?;
            match request {
                ScheduleRequest::Save => SumaTaskArgs::Save(task_id),
                ScheduleRequest::Unschedule => SumaTaskArgs::Unschedule(task_id),
                ScheduleRequest::Schedule(spec) => SumaTaskArgs::Schedule { spec, task_id },
            }
        }
        Action::Unschedule => SumaTaskArgs::Unschedule(required_task()?),
        Action::Delete => SumaTaskArgs::Delete(required_task()?),
        Action::Config => SumaTaskArgs::Config,
        Action::Default => SumaTaskArgs::Default,
        Action::Download | Action::Preview => {
            return Err(SumaError::State(format!(
                "{} is not a task management action",
                action
            )));
        }
    };
    Ok(args)
}

/// Run a task management action.
pub fn run_task<R>(ctx: &ModuleContext<'_, R>, report: &mut RunReport) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let params = ctx.params;
    let args = task_request(params.action, params.task_id(), params.sched_time.as_deref())?;
    let command_line = args.command_line();
    debug!("SUMA command:{}", command_line);

    let output = run_tool(ctx.runner, &args)?;
    report.capture(&output.stdout, &output.stderr);

    let label = match params.action {
        Action::Default => "list default".to_string(),
        other => other.to_string(),
    };
    output.ensure_success(&format!("Suma {} command '{}'", label, command_line))?;
    Ok(())
}
