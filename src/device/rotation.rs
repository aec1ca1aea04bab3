//! Page rotation schedule of the display

use crate::config::{ConfigOptions, OptionsExt, PageSwitchMode};
use crate::pages::{self, PageIndex};
use std::time::{Duration, Instant};

/// Where the rotation stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationStatus {
    /// Page the display shows
    pub page_num: PageIndex,
    /// 1-based position of `page_num` among the enabled pages
    pub page_idx: usize,
    /// Number of enabled pages
    pub page_total: usize,
}

/// Timer-driven page scheduler
#[derive(Debug, Clone, Default)]
pub struct DeviceRotation {
    current: PageIndex,
    last_switch: Option<Instant>,
}

impl DeviceRotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> PageIndex {
        self.current
    }

    /// Advance the schedule to `now`
    ///
    /// With no page enabled the display stays on page 1. Touch mode pins
    /// the first enabled page and keeps resetting the timer; the other
    /// modes step to the next enabled page once `page_interval` seconds
    /// have passed. The first tick only starts the timer.
    pub fn tick(&mut self, options: &ConfigOptions, now: Instant) -> RotationStatus {
        let mut enabled = pages::enabled_pages(options);
        if enabled.is_empty() {
            enabled.push(PageIndex::FIRST);
        }

        if !enabled.contains(&self.current) {
            self.current = enabled[0];
        }

        match options.page_switch_mode() {
            PageSwitchMode::Touch => {
                self.current = enabled[0];
                self.last_switch = Some(now);
            }
            PageSwitchMode::Auto | PageSwitchMode::Both => {
                let interval = Duration::from_secs(u64::from(options.page_interval()));
                match self.last_switch {
                    None => self.last_switch = Some(now),
                    Some(last) if now.saturating_duration_since(last) >= interval => {
                        let position = enabled
                            .iter()
                            .position(|p| *p == self.current)
                            .unwrap_or(0);
                        self.current = enabled[(position + 1) % enabled.len()];
                        self.last_switch = Some(now);
                        tracing::debug!("Display rotated to page {}", self.current);
                    }
                    Some(_) => {}
                }
            }
        }

        let page_idx = enabled
            .iter()
            .position(|p| *p == self.current)
            .map_or(1, |i| i + 1);

        RotationStatus {
            page_num: self.current,
            page_idx,
            page_total: enabled.len(),
        }
    }

    /// Time left until the next switch, `None` when not rotating
    pub fn until_next(&self, options: &ConfigOptions, now: Instant) -> Option<Duration> {
        if !options.page_switch_mode().rotates() {
            return None;
        }
        let interval = Duration::from_secs(u64::from(options.page_interval()));
        let last = self.last_switch?;
        Some(interval.saturating_sub(now.saturating_duration_since(last)))
    }
}
