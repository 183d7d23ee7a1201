//! Algorithm visualization step player.
//!
//! A [`StepPlayer`] walks a fixed list of pre-authored steps. Manual
//! stepping clamps at both ends; playback advances once per interval and
//! stops by itself on the last step.

use codearena_common::VisualizerConfig;
use codearena_domain::visualization::{ArrayPointer, Edge, Node};
use codearena_domain::{Frame, VisualizationStep};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Slowest and fastest speed settings
pub const SPEED_RANGE: std::ops::RangeInclusive<u8> = 1..=100;

/// Step-indexed player state.
#[derive(Debug, Clone)]
pub struct StepPlayer {
    steps: Vec<VisualizationStep>,
    current: usize,
    playing: bool,
    speed: u8,
}

impl StepPlayer {
    pub fn new(steps: Vec<VisualizationStep>) -> Self {
        Self {
            steps,
            current: 0,
            playing: false,
            speed: 50,
        }
    }

    pub fn with_config(steps: Vec<VisualizationStep>, config: &VisualizerConfig) -> Self {
        let mut player = Self::new(steps);
        player.set_speed(config.default_speed);
        player
    }

    pub fn steps(&self) -> &[VisualizationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    /// Step being shown; `None` only for an empty script
    pub fn current(&self) -> Option<&VisualizationStep> {
        self.steps.get(self.current)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    fn at_end(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    /// Move one step forward; no-op on the last step
    pub fn step_forward(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move one step back; no-op on the first step
    pub fn step_backward(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn jump_to(&mut self, index: usize) {
        self.current = index.min(self.steps.len().saturating_sub(1));
    }

    /// Play/pause. Starting playback from the last step rewinds to 0.
    pub fn toggle_play(&mut self) {
        if !self.playing && self.at_end() {
            self.current = 0;
        }
        self.playing = !self.playing;
    }

    /// Speed setting clamped to `1..=100`
    pub fn set_speed(&mut self, speed: u8) {
        self.speed = speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
    }

    /// Time between automatic steps: 4955 ms at speed 1, 500 ms at 100
    pub fn interval(&self) -> Duration {
        Duration::from_millis(5000 - u64::from(self.speed) * 45)
    }

    /// One playback tick. On the last step playback stops instead.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.at_end() {
            self.playing = false;
            return false;
        }
        self.current += 1;
        true
    }

    /// Drive playback on a tokio interval until it stops.
    ///
    /// `on_step` sees every step reached. Returns the number of steps
    /// advanced.
    pub async fn run<F>(&mut self, mut on_step: F) -> usize
    where
        F: FnMut(usize, &VisualizationStep),
    {
        let mut interval = tokio::time::interval(self.interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        interval.tick().await;

        let mut advanced = 0;
        while self.playing {
            interval.tick().await;
            if self.tick() {
                advanced += 1;
                if let Some(step) = self.current() {
                    on_step(self.current, step);
                }
            }
        }
        debug!(advanced, index = self.current, "Playback stopped");
        advanced
    }
}

/// Names accepted by [`builtin_script`]
pub const BUILTIN_SCRIPTS: [&str; 3] = ["two-sum", "merge-intervals", "bfs"];

/// Pre-authored steps by script name
pub fn builtin_script(name: &str) -> Option<Vec<VisualizationStep>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "two-sum" => Some(two_sum_steps()),
        "merge-intervals" => Some(merge_intervals_steps()),
        "bfs" => Some(bfs_steps()),
        _ => None,
    }
}

fn array(values: &[&str], pointers: &[(usize, &str, bool)]) -> Frame {
    Frame::Array {
        values: values.iter().map(|v| v.to_string()).collect(),
        pointers: pointers
            .iter()
            .map(|&(index, label, highlight)| ArrayPointer {
                index,
                label: label.to_string(),
                highlight,
            })
            .collect(),
    }
}

fn two_sum_steps() -> Vec<VisualizationStep> {
    let nums = ["2", "7", "11", "15"];
    vec![
        VisualizationStep::new(
            "Initialize an empty map from value to index",
            "const seen = new Map();",
            array(&nums, &[]),
        ),
        VisualizationStep::new(
            "i = 0: complement 9 - 2 = 7 is not in the map, store 2 -> 0",
            "const complement = target - nums[i];\nseen.set(nums[i], i);",
            array(&nums, &[(0, "i", true)]),
        ),
        VisualizationStep::new(
            "i = 1: complement 9 - 7 = 2 is in the map at index 0",
            "if (seen.has(complement)) {",
            array(&nums, &[(0, "seen", false), (1, "i", true)]),
        ),
        VisualizationStep::new(
            "Return the pair of indices",
            "return [seen.get(complement), i];",
            Frame::Basic {
                value: "result = [0, 1]".into(),
            },
        ),
    ]
}

fn merge_intervals_steps() -> Vec<VisualizationStep> {
    let sorted = ["[1,3]", "[2,6]", "[8,10]", "[15,18]"];
    vec![
        VisualizationStep::new(
            "Sort intervals by start",
            "intervals.sort((a, b) => a[0] - b[0]);",
            array(&sorted, &[]),
        ),
        VisualizationStep::new(
            "Start the result with the first interval",
            "const merged = [intervals[0]];",
            array(&sorted, &[(0, "last", true)]),
        ),
        VisualizationStep::new(
            "[2,6] overlaps [1,3]; extend the end to 6",
            "last[1] = Math.max(last[1], current[1]);",
            array(&["[1,6]", "[8,10]", "[15,18]"], &[(0, "last", true)]),
        ),
        VisualizationStep::new(
            "[8,10] does not overlap; append it",
            "merged.push(current);",
            array(&["[1,6]", "[8,10]", "[15,18]"], &[(1, "last", true)]),
        ),
        VisualizationStep::new(
            "[15,18] does not overlap; append it",
            "merged.push(current);",
            array(&["[1,6]", "[8,10]", "[15,18]"], &[(2, "last", true)]),
        ),
    ]
}

fn graph(visited: &[&str], current: Option<&str>, walked: &[(&str, &str)]) -> Frame {
    let nodes = ["0", "1", "2", "3"]
        .into_iter()
        .map(|id| Node {
            highlight: current == Some(id),
            visited: visited.contains(&id),
            ..Node::new(id)
        })
        .collect();
    let edges = [("0", "1"), ("0", "2"), ("1", "3"), ("2", "3")]
        .into_iter()
        .map(|(source, target)| Edge {
            visited: walked.contains(&(source, target)),
            ..Edge::new(source, target)
        })
        .collect();
    Frame::Graph { nodes, edges }
}

fn bfs_steps() -> Vec<VisualizationStep> {
    vec![
        VisualizationStep::new(
            "Initialize graph representation",
            "const graph = buildAdjList(edges);\nconst visited = new Set();",
            graph(&[], None, &[]),
        ),
        VisualizationStep::new(
            "Enqueue the start node 0",
            "const queue = [0];\nvisited.add(0);",
            graph(&["0"], Some("0"), &[]),
        ),
        VisualizationStep::new(
            "Visit neighbours 1 and 2",
            "for (const next of graph[node]) queue.push(next);",
            graph(&["0", "1", "2"], Some("1"), &[("0", "1"), ("0", "2")]),
        ),
        VisualizationStep::new(
            "Reach node 3 from 1; 3 is already queued when seen from 2",
            "if (!visited.has(next)) visited.add(next);",
            graph(&["0", "1", "2", "3"], Some("3"), &[("0", "1"), ("0", "2"), ("1", "3")]),
        ),
    ]
}
