//! Change notifications for whoever draws the series

/// What changed in a [`super::SampleSeries`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesEvent {
    /// All samples and the table were replaced by a file load
    Replaced,
    /// All samples were removed
    Cleared,
    /// A sample was appended at this index
    SampleAdded(usize),
    /// The sample at this index was removed
    SampleRemoved(usize),
    /// The sample at this index was edited
    SampleChanged(usize),
    /// Boost ladder or selected level changed
    BoostChanged,
    /// Display units or curve visibility changed
    SettingsChanged,
}

/// Handle returned by [`Observers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(SeriesEvent)>;

/// Callback list, invoked synchronously in subscription order
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    callbacks: Vec<(ObserverId, Callback)>,
}

impl Observers {
    pub(crate) fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(SeriesEvent) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub(crate) fn notify(&mut self, event: SeriesEvent) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(event);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
