//! One-shot, visibility-driven reveal scheduling.
//!
//! Each target moves through `pending -> armed -> revealed` exactly once.
//! Arming happens on the first qualifying visibility sample and immediately
//! stops observation of that target; the visual effect lands later, when the
//! target's stagger timer elapses. The two steps are deliberately decoupled:
//! tearing the scheduler down mid-delay leaves a target armed but never
//! revealed, which is an accepted terminal state. Targets that never enter
//! the viewport stay pending forever.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::page::{NodeId, PageModel, Viewport};

/// Per-target animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Observed, waiting to enter the viewport
    Pending,
    /// Became visible; effect scheduled, observation stopped
    Armed { fire_at_ms: u64 },
    /// Terminal: effect applied
    Revealed,
}

/// Visibility and stagger tuning for one scheduler instance.
#[derive(Debug, Clone, Copy)]
pub struct ObserverConfig {
    /// Fraction of the node's span that must be inside the viewport
    pub threshold: f64,
    /// Units shaved off the viewport's bottom edge before measuring
    pub bottom_margin: f64,
    /// Per-sibling-index delay between reveals
    pub stagger_ms: u64,
}

impl ObserverConfig {
    /// Tuning for the grid reveal instance.
    pub fn grid(config: &EngineConfig) -> Self {
        Self {
            threshold: config.grid_threshold,
            bottom_margin: config.grid_bottom_margin,
            stagger_ms: config.stagger_ms,
        }
    }

    /// Tuning for the section label/title instance: earlier threshold,
    /// tighter margin, no stagger.
    pub fn titles(config: &EngineConfig) -> Self {
        Self {
            threshold: config.title_threshold,
            bottom_margin: config.title_bottom_margin,
            stagger_ms: 0,
        }
    }
}

/// Terminal visual treatment a scheduler applies when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEffect {
    /// Add the `in-view` class (grid targets; the stylesheet animates)
    InViewClass,
    /// Clear the suppressed inline style back to the natural one (titles)
    NaturalStyle,
}

/// Counts per phase, for snapshots and progress logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevealCounts {
    pub pending: usize,
    pub armed: usize,
    pub revealed: usize,
}

#[derive(Debug, Clone, Copy)]
struct PendingReveal {
    node: NodeId,
    fire_at_ms: u64,
}

/// Scheduler for one independent set of reveal targets. The grid and the
/// section titles each get their own instance; they share no state.
pub struct RevealScheduler {
    config: ObserverConfig,
    effect: RevealEffect,
    states: HashMap<NodeId, RevealPhase>,
    timers: Vec<PendingReveal>,
}

impl RevealScheduler {
    pub fn new(config: ObserverConfig, effect: RevealEffect) -> Self {
        Self {
            config,
            effect,
            states: HashMap::new(),
            timers: Vec::new(),
        }
    }

    /// Start observing a static set of targets. Called once at startup.
    pub fn observe_targets(&mut self, targets: Vec<NodeId>) {
        for id in targets {
            self.states.entry(id).or_insert(RevealPhase::Pending);
        }
    }

    /// Apply the initial suppressed style to pending targets. Only the
    /// `NaturalStyle` effect has one; grid targets start from their
    /// stylesheet state.
    pub fn prime(&mut self, page: &mut PageModel) {
        if self.effect != RevealEffect::NaturalStyle {
            return;
        }
        let pending: Vec<NodeId> = self.pending_targets();
        for id in pending {
            if let Some(style) = page.style_mut(id) {
                style.opacity = Some(0.0);
                style.translate_y = Some(20.0);
                style.transition = Some(
                    "opacity 0.7s cubic-bezier(0.25, 0.46, 0.45, 0.94), \
                     transform 0.7s cubic-bezier(0.25, 0.46, 0.45, 0.94)"
                        .to_string(),
                );
            }
        }
    }

    /// Run one visibility sample over every still-observed target. A target
    /// whose intersection ratio reaches the threshold is armed with its
    /// stagger delay and dropped from observation in the same step, so it
    /// can never re-trigger.
    pub fn visibility_pass(&mut self, page: &PageModel, viewport: Viewport, now_ms: u64) {
        for id in self.pending_targets() {
            let Some(node) = page.get(id) else { continue };
            let ratio = viewport.intersection_ratio(node.top, node.height, self.config.bottom_margin);
            if ratio < self.config.threshold {
                continue;
            }

            let index = self.sibling_index(page, id);
            let delay = index as u64 * self.config.stagger_ms;
            let fire_at_ms = now_ms + delay;
            self.states.insert(id, RevealPhase::Armed { fire_at_ms });
            self.timers.push(PendingReveal {
                node: id,
                fire_at_ms,
            });
            debug!(
                "reveal target {:?} armed at {}ms (sibling index {}, fires at {}ms)",
                id, now_ms, index, fire_at_ms
            );
        }
    }

    /// Fire every timer that has come due. Timers are independent and
    /// cannot be cancelled; an armed target whose timer never gets a tick
    /// simply stays armed.
    pub fn tick(&mut self, page: &mut PageModel, now_ms: u64) {
        let mut due = Vec::new();
        self.timers.retain(|timer| {
            if timer.fire_at_ms <= now_ms {
                due.push(timer.node);
                false
            } else {
                true
            }
        });

        for id in due {
            self.states.insert(id, RevealPhase::Revealed);
            self.apply_effect(page, id);
            debug!("reveal target {:?} revealed at {}ms", id, now_ms);
        }
    }

    fn apply_effect(&self, page: &mut PageModel, id: NodeId) {
        match self.effect {
            RevealEffect::InViewClass => page.add_class(id, "in-view"),
            RevealEffect::NaturalStyle => {
                if let Some(style) = page.style_mut(id) {
                    style.opacity = Some(1.0);
                    style.translate_y = Some(0.0);
                }
            }
        }
    }

    /// Position of `id` among its sibling targets (registered targets
    /// sharing the same immediate parent), in document order.
    fn sibling_index(&self, page: &PageModel, id: NodeId) -> usize {
        let siblings = match page.parent_of(id) {
            Some(parent) => page.children_of(parent),
            None => page.roots(),
        };
        siblings
            .into_iter()
            .filter(|s| self.states.contains_key(s))
            .position(|s| s == id)
            .unwrap_or(0)
    }

    fn pending_targets(&self) -> Vec<NodeId> {
        let mut pending: Vec<NodeId> = self
            .states
            .iter()
            .filter(|(_, phase)| matches!(phase, RevealPhase::Pending))
            .map(|(id, _)| *id)
            .collect();
        pending.sort();
        pending
    }

    pub fn phase(&self, id: NodeId) -> Option<RevealPhase> {
        self.states.get(&id).copied()
    }

    pub fn counts(&self) -> RevealCounts {
        let mut counts = RevealCounts::default();
        for phase in self.states.values() {
            match phase {
                RevealPhase::Pending => counts.pending += 1,
                RevealPhase::Armed { .. } => counts.armed += 1,
                RevealPhase::Revealed => counts.revealed += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Marker, NodeSpec};

    /// Grid of four reveal targets stacked inside one parent at 1000..1400.
    fn grid_page() -> (PageModel, Vec<NodeId>) {
        let mut page = PageModel::new();
        let grid = page.insert(
            None,
            NodeSpec {
                top: 1000.0,
                height: 400.0,
                ..Default::default()
            },
        );
        let targets: Vec<NodeId> = (0..4)
            .map(|i| {
                page.insert(
                    Some(grid),
                    NodeSpec {
                        top: 1000.0 + i as f64 * 100.0,
                        height: 100.0,
                        markers: vec![Marker::Reveal],
                        ..Default::default()
                    },
                )
            })
            .collect();
        (page, targets)
    }

    fn grid_scheduler(targets: &[NodeId]) -> RevealScheduler {
        let mut scheduler = RevealScheduler::new(
            ObserverConfig::grid(&EngineConfig::default()),
            RevealEffect::InViewClass,
        );
        scheduler.observe_targets(targets.to_vec());
        scheduler
    }

    #[test]
    fn test_targets_start_pending() {
        let (_, targets) = grid_page();
        let scheduler = grid_scheduler(&targets);

        for id in &targets {
            assert_eq!(scheduler.phase(*id), Some(RevealPhase::Pending));
        }
        assert_eq!(scheduler.counts().pending, 4);
    }

    #[test]
    fn test_offscreen_targets_stay_pending() {
        let (mut page, targets) = grid_page();
        let mut scheduler = grid_scheduler(&targets);

        // Viewport covers 0..800; grid starts at 1000.
        scheduler.visibility_pass(&page, Viewport::new(0.0, 800.0), 0);
        scheduler.tick(&mut page, 10_000);

        assert_eq!(scheduler.counts().pending, 4);
    }

    #[test]
    fn test_simultaneous_arming_staggers_by_sibling_index() {
        let (page, targets) = grid_page();
        let mut scheduler = grid_scheduler(&targets);

        // Scroll far enough that the whole grid is visible at once.
        scheduler.visibility_pass(&page, Viewport::new(900.0, 800.0), 1000);

        for (i, id) in targets.iter().enumerate() {
            assert_eq!(
                scheduler.phase(*id),
                Some(RevealPhase::Armed {
                    fire_at_ms: 1000 + i as u64 * 150
                })
            );
        }
    }

    #[test]
    fn test_reveal_fires_at_exact_stagger_time() {
        let (mut page, targets) = grid_page();
        let mut scheduler = grid_scheduler(&targets);
        scheduler.visibility_pass(&page, Viewport::new(900.0, 800.0), 0);

        // Sibling index 2 fires at 300, not before.
        scheduler.tick(&mut page, 299);
        assert_eq!(
            scheduler.phase(targets[2]),
            Some(RevealPhase::Armed { fire_at_ms: 300 })
        );
        assert!(!page.get(targets[2]).unwrap().has_class("in-view"));

        scheduler.tick(&mut page, 300);
        assert_eq!(scheduler.phase(targets[2]), Some(RevealPhase::Revealed));
        assert!(page.get(targets[2]).unwrap().has_class("in-view"));
    }

    #[test]
    fn test_reveal_timestamps_monotonic_in_document_order() {
        let (mut page, targets) = grid_page();
        let mut scheduler = grid_scheduler(&targets);
        scheduler.visibility_pass(&page, Viewport::new(900.0, 800.0), 0);

        let mut reveal_times: Vec<Option<u64>> = vec![None; targets.len()];
        for now in 0..=600 {
            scheduler.tick(&mut page, now);
            for (i, id) in targets.iter().enumerate() {
                if reveal_times[i].is_none() && scheduler.phase(*id) == Some(RevealPhase::Revealed)
                {
                    reveal_times[i] = Some(now);
                }
            }
        }

        assert_eq!(
            reveal_times,
            vec![Some(0), Some(150), Some(300), Some(450)]
        );
    }

    #[test]
    fn test_armed_target_is_no_longer_observed() {
        let (page, targets) = grid_page();
        let mut scheduler = grid_scheduler(&targets);

        scheduler.visibility_pass(&page, Viewport::new(900.0, 800.0), 100);
        let timer_count = scheduler.timers.len();

        // A second qualifying sample must not rearm or duplicate timers.
        scheduler.visibility_pass(&page, Viewport::new(900.0, 800.0), 200);
        assert_eq!(scheduler.timers.len(), timer_count);
        assert_eq!(
            scheduler.phase(targets[0]),
            Some(RevealPhase::Armed { fire_at_ms: 100 })
        );
    }

    #[test]
    fn test_revealed_is_terminal_despite_reentry() {
        let (mut page, targets) = grid_page();
        let mut scheduler = grid_scheduler(&targets);

        scheduler.visibility_pass(&page, Viewport::new(900.0, 800.0), 0);
        scheduler.tick(&mut page, 1000);
        assert_eq!(scheduler.counts().revealed, 4);

        // Leave and re-enter the viewport; nothing changes.
        scheduler.visibility_pass(&page, Viewport::new(0.0, 800.0), 2000);
        scheduler.visibility_pass(&page, Viewport::new(900.0, 800.0), 3000);
        scheduler.tick(&mut page, 4000);

        assert_eq!(scheduler.counts().revealed, 4);
        assert!(scheduler.timers.is_empty());
    }

    #[test]
    fn test_partial_visibility_below_threshold() {
        let (page, targets) = grid_page();
        let mut scheduler = grid_scheduler(&targets);

        // Viewport 0..1010 with an 80 unit bottom margin measures against
        // 0..930, so the first target (1000..1100) has ratio 0.
        scheduler.visibility_pass(&page, Viewport::new(0.0, 1010.0), 0);
        assert_eq!(scheduler.counts().pending, 4);

        // 0..1103 measures against 0..1023: first target ratio 0.23 >= 0.15
        // arms it, second target (1100..1200) ratio 0 stays pending.
        scheduler.visibility_pass(&page, Viewport::new(0.0, 1103.0), 0);
        assert!(matches!(
            scheduler.phase(targets[0]),
            Some(RevealPhase::Armed { .. })
        ));
        assert_eq!(scheduler.phase(targets[1]), Some(RevealPhase::Pending));
    }

    #[test]
    fn test_stagger_index_counts_only_marked_siblings() {
        let mut page = PageModel::new();
        let grid = page.insert(
            None,
            NodeSpec {
                top: 0.0,
                height: 400.0,
                ..Default::default()
            },
        );
        // Unmarked spacer between two targets.
        let first = page.insert(
            Some(grid),
            NodeSpec {
                top: 0.0,
                height: 100.0,
                markers: vec![Marker::Reveal],
                ..Default::default()
            },
        );
        page.insert(
            Some(grid),
            NodeSpec {
                top: 100.0,
                height: 100.0,
                ..Default::default()
            },
        );
        let second = page.insert(
            Some(grid),
            NodeSpec {
                top: 200.0,
                height: 100.0,
                markers: vec![Marker::Reveal],
                ..Default::default()
            },
        );

        let mut scheduler = grid_scheduler(&[first, second]);
        scheduler.visibility_pass(&page, Viewport::new(0.0, 800.0), 0);

        // The spacer does not shift the stagger: second target is index 1.
        assert_eq!(
            scheduler.phase(second),
            Some(RevealPhase::Armed { fire_at_ms: 150 })
        );
    }

    #[test]
    fn test_title_instance_prime_and_reveal() {
        let mut page = PageModel::new();
        let title = page.insert(
            None,
            NodeSpec {
                top: 100.0,
                height: 40.0,
                markers: vec![Marker::SectionTitle],
                ..Default::default()
            },
        );

        let mut scheduler = RevealScheduler::new(
            ObserverConfig::titles(&EngineConfig::default()),
            RevealEffect::NaturalStyle,
        );
        scheduler.observe_targets(vec![title]);
        scheduler.prime(&mut page);

        let style = page.get(title).unwrap().style().clone();
        assert_eq!(style.opacity, Some(0.0));
        assert_eq!(style.translate_y, Some(20.0));
        assert!(style.transition.is_some());

        // No stagger: armed and revealed at the same timestamp.
        scheduler.visibility_pass(&page, Viewport::new(0.0, 800.0), 500);
        assert_eq!(
            scheduler.phase(title),
            Some(RevealPhase::Armed { fire_at_ms: 500 })
        );
        scheduler.tick(&mut page, 500);

        let style = page.get(title).unwrap().style().clone();
        assert_eq!(scheduler.phase(title), Some(RevealPhase::Revealed));
        assert_eq!(style.opacity, Some(1.0));
        assert_eq!(style.translate_y, Some(0.0));
    }

    #[test]
    fn test_grid_prime_is_a_noop() {
        let (mut page, targets) = grid_page();
        let mut scheduler = grid_scheduler(&targets);

        scheduler.prime(&mut page);
        assert_eq!(page.get(targets[0]).unwrap().style().opacity, None);
    }
}
