use super::{Axis, Derived};

/// A major tick of an axis
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position in data space
    pub pos: f64,
    /// Label text, empty when the position lies outside the axis range
    pub label: String,
}

#[derive(Debug, Clone, Copy)]
enum State {
    NotStarted,
    Iterating { pos: f64, idx: usize },
    Exhausted,
}

/// Iterator over the major ticks of an axis, created by [`Axis::ticks`].
///
/// Generated ticks start at the tick start (which may lie below the axis minimum)
/// and advance by the tick spacing (or multiply by the log spacing in power mode),
/// until the position exceeds the axis maximum.
///
/// When the axis has manual tick labels, they are walked in order instead.
/// The first label is always yielded. The walk then stops at the end of the list
/// or at the first label positioned outside the range.
#[derive(Debug, Clone)]
pub struct Ticks<'a> {
    axis: &'a Axis,
    derived: &'a Derived,
    state: State,
}

impl<'a> Ticks<'a> {
    pub(super) fn new(axis: &'a Axis) -> Self {
        Ticks {
            axis,
            derived: axis.derived(),
            state: State::NotStarted,
        }
    }

    fn in_range(&self, pos: f64) -> bool {
        pos >= self.derived.min && pos <= self.derived.max
    }

    fn generated_tick(&mut self, pos: f64) -> Option<Tick> {
        let label = if self.in_range(pos) {
            self.axis.format_label(pos)
        } else {
            String::new()
        };
        self.state = State::Iterating { pos, idx: 0 };
        Some(Tick { pos, label })
    }

    fn override_tick(&mut self, idx: usize) -> Option<Tick> {
        let Some((pos, label)) = self.axis.tick_labels.get(idx) else {
            self.state = State::Exhausted;
            return None;
        };
        self.state = State::Iterating { pos: *pos, idx };
        Some(Tick {
            pos: *pos,
            label: label.clone(),
        })
    }
}

impl Iterator for Ticks<'_> {
    type Item = Tick;

    fn next(&mut self) -> Option<Self::Item> {
        let overrides = !self.axis.tick_labels.is_empty();
        match self.state {
            State::Exhausted => None,
            State::NotStarted if overrides => self.override_tick(0),
            State::NotStarted => {
                let start = self.derived.tick_start;
                if !start.is_finite() || start > self.derived.max {
                    self.state = State::Exhausted;
                    return None;
                }
                self.generated_tick(start)
            }
            State::Iterating { idx, .. } if overrides => {
                match self.axis.tick_labels.get(idx + 1) {
                    Some((pos, _)) if self.in_range(*pos) => self.override_tick(idx + 1),
                    _ => {
                        self.state = State::Exhausted;
                        None
                    }
                }
            }
            State::Iterating { pos, .. } => {
                let next = self.axis.advance(self.derived, pos);
                // a spacing that doesn't advance would never reach the maximum
                if !(next > pos) || next > self.derived.max {
                    self.state = State::Exhausted;
                    return None;
                }
                self.generated_tick(next)
            }
        }
    }
}

impl std::iter::FusedIterator for Ticks<'_> {}
