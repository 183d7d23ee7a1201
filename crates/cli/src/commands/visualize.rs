//! Algorithm visualizer command

use anyhow::{anyhow, Result};
use clap::Args;
use codearena_application::visualizer::{builtin_script, BUILTIN_SCRIPTS};
use codearena_application::StepPlayer;
use codearena_domain::VisualizationStep;
use serde::Serialize;

use crate::commands::CommandContext;
use crate::output::{colors, render};
use crate::progress;

#[derive(Args, Debug, Clone, Default)]
pub struct VisualizeArgs {
    /// Script name (two-sum, merge-intervals, bfs)
    #[arg(required_unless_present = "list")]
    pub script: Option<String>,

    /// Playback speed, 1 (slowest) to 100
    #[arg(long)]
    pub speed: Option<u8>,

    /// Print every step without waiting between them
    #[arg(long)]
    pub instant: bool,

    /// List the available scripts
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Serialize)]
struct StepView<'a> {
    index: usize,
    #[serde(flatten)]
    step: &'a VisualizationStep,
}

fn step_text(index: usize, total: usize, step: &VisualizationStep) -> String {
    format!(
        "{} {}\n  {}\n  {}",
        colors::bold(&format!("Step {}/{total}", index + 1)),
        step.description,
        colors::dim(&step.code),
        step.frame.summary()
    )
}

/// Play a built-in script, or print all of it with `--instant`
pub async fn visualize(ctx: &CommandContext, args: &VisualizeArgs) -> Result<String> {
    if args.list {
        return render(ctx.format, &BUILTIN_SCRIPTS, || Ok(BUILTIN_SCRIPTS.join("\n")));
    }

    let name = args.script.as_deref().unwrap_or_default();
    let steps = builtin_script(name).ok_or_else(|| {
        anyhow!(
            "Unknown script '{name}'. Available: {}",
            BUILTIN_SCRIPTS.join(", ")
        )
    })?;

    let mut player = StepPlayer::with_config(steps, &ctx.config.visualizer);
    if let Some(speed) = args.speed {
        player.set_speed(speed);
    }

    let total = player.len();
    let mut shown = vec![0];
    if !args.instant && total > 1 {
        let bar = progress::step_bar(total as u64);
        bar.set_position(1);
        player.toggle_play();
        player
            .run(|index, step| {
                bar.set_position(index as u64 + 1);
                bar.set_message(step.description.clone());
                shown.push(index);
            })
            .await;
        bar.finish_and_clear();
    } else {
        shown = (0..total).collect();
    }

    let steps = player.steps();
    let view: Vec<StepView<'_>> = shown
        .iter()
        .map(|&index| StepView {
            index,
            step: &steps[index],
        })
        .collect();

    render(ctx.format, &view, || {
        Ok(view
            .iter()
            .map(|v| step_text(v.index, total, v.step))
            .collect::<Vec<_>>()
            .join("\n\n"))
    })
}
