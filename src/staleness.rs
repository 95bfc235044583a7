use tracing::debug;

use crate::clock::elapsed_ms;
use crate::config::StalenessConfig;
use crate::state::{FieldGroup, SensorState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

#[derive(Debug, Clone)]
struct GroupTimer {
    timeout_ms: u32,
    last_update: Option<u32>,
    freshness: Freshness,
}

/// Tracks one Fresh/Stale state machine per field group.
///
/// A group leaves Stale only through `mark_updated`, so a group that stays
/// silent long enough for the millisecond counter to wrap is still reported
/// stale.
#[derive(Debug, Clone)]
pub struct StalenessMonitor {
    timers: [GroupTimer; 4],
}

impl StalenessMonitor {
    pub fn new(config: &StalenessConfig) -> Self {
        let timer = |group| GroupTimer {
            timeout_ms: config.timeout_ms(group),
            last_update: None,
            freshness: Freshness::Stale,
        };
        Self {
            timers: FieldGroup::ALL.map(timer),
        }
    }

    /// Record a successful update of `group` at `now_ms`.
    pub fn mark_updated(&mut self, group: FieldGroup, now_ms: u32) {
        let timer = &mut self.timers[group.index()];
        if timer.freshness == Freshness::Stale {
            debug!("Field group {} is fresh again", group.name());
        }
        timer.last_update = Some(now_ms);
        timer.freshness = Freshness::Fresh;
    }

    pub fn freshness(&self, group: FieldGroup) -> Freshness {
        self.timers[group.index()].freshness
    }

    pub fn last_update(&self, group: FieldGroup) -> Option<u32> {
        self.timers[group.index()].last_update
    }

    /// Move expired groups to Stale and clear the fields of every stale group.
    ///
    /// Returns the groups that became stale during this pass.
    pub fn apply(&mut self, state: &mut SensorState, now_ms: u32) -> Vec<FieldGroup> {
        let mut expired = Vec::new();
        for group in FieldGroup::ALL {
            let timer = &mut self.timers[group.index()];
            if timer.freshness == Freshness::Fresh {
                let timed_out = match timer.last_update {
                    Some(last) => elapsed_ms(now_ms, last) >= timer.timeout_ms,
                    None => true,
                };
                if timed_out {
                    debug!("Field group {} is stale after {} ms", group.name(), timer.timeout_ms);
                    timer.freshness = Freshness::Stale;
                    expired.push(group);
                }
            }
            if timer.freshness == Freshness::Stale {
                state.clear_group(group);
            }
        }
        expired
    }
}
