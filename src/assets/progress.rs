//! Aggregate load progress across sequentially loaded groups.

/// Progress over `groups` load groups loaded one after another.
///
/// Overall progress is `(completed + current) / groups`, where `current`
/// is the fraction reported by the group in flight. Reports never move the
/// bar backwards and are clamped to `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadProgress {
    groups: usize,
    completed: usize,
    current: f32,
    overall: f32,
}

impl LoadProgress {
    /// Track `groups` groups. Zero groups counts as already complete.
    #[must_use]
    pub fn new(groups: usize) -> Self {
        Self {
            groups,
            completed: 0,
            current: 0.0,
            overall: if groups == 0 { 1.0 } else { 0.0 },
        }
    }

    /// Report progress of the group currently loading.
    pub fn report(&mut self, fraction: f32) -> f32 {
        if self.is_complete() {
            return self.overall;
        }
        self.current = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.recompute()
    }

    /// Mark the current group finished and move to the next one.
    pub fn complete_group(&mut self) -> f32 {
        if self.completed < self.groups {
            self.completed += 1;
            self.current = 0.0;
            if self.is_complete() {
                log::info!("all {} asset groups loaded", self.groups);
            }
        }
        self.recompute()
    }

    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.overall
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed >= self.groups
    }

    fn recompute(&mut self) -> f32 {
        let raw = if self.groups == 0 {
            1.0
        } else {
            ((self.completed as f32 + self.current) / self.groups as f32).clamp(0.0, 1.0)
        };
        self.overall = self.overall.max(raw);
        self.overall
    }
}
