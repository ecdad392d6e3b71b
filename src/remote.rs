/// State of one remote fetch: data, loading flag, inline error, and the
/// generation of the request the state belongs to.
///
/// A completion is only committed when it carries the current generation, so
/// a response that was overtaken by a newer request can never overwrite the
/// newer state. Callers that have no scoping parameter call `reset` instead
/// of `begin`; nothing here touches the network.
#[derive(Debug, Clone)]
pub struct Remote<T> {
    data: Option<T>,
    is_loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> Remote<T> {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Marks a new request in flight and returns its generation. Any earlier
    /// in-flight request is implicitly abandoned.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.is_loading = true;
        self.error = None;
        self.generation
    }

    /// Commits a completed request. Returns false (and changes nothing) when
    /// the generation is stale.
    pub fn commit(&mut self, generation: u64, result: Result<T, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.is_loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }

    /// Drops data and error and invalidates any in-flight request.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.data = None;
        self.error = None;
        self.is_loading = false;
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T> Remote<Vec<T>> {
    /// Option list for picklists; empty while unloaded.
    pub fn items(&self) -> &[T] {
        self.data.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_state_has_no_data_and_is_not_loading() {
        let remote: Remote<Vec<i32>> = Remote::idle();
        assert!(remote.data().is_none());
        assert!(!remote.is_loading());
        assert!(remote.error().is_none());
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut remote: Remote<Vec<i32>> = Remote::idle();
        let first = remote.begin();
        let second = remote.begin();

        // The request for A resolves after B was issued.
        assert!(!remote.commit(first, Ok(vec![1])));
        assert!(remote.data().is_none());
        assert!(remote.is_loading());

        assert!(remote.commit(second, Ok(vec![2])));
        assert_eq!(remote.data(), Some(&vec![2]));
        assert!(!remote.is_loading());
    }

    #[test]
    fn reset_invalidates_in_flight_request() {
        let mut remote: Remote<Vec<i32>> = Remote::idle();
        let generation = remote.begin();
        remote.reset();
        assert!(!remote.commit(generation, Ok(vec![1])));
        assert!(remote.data().is_none());
        assert!(!remote.is_loading());
    }

    #[test]
    fn error_is_captured_inline_not_thrown() {
        let mut remote: Remote<Vec<i32>> = Remote::idle();
        let generation = remote.begin();
        assert!(remote.commit(generation, Err("sin conexión".to_string())));
        assert_eq!(remote.error(), Some("sin conexión"));
        assert!(remote.data().is_none());
        assert!(!remote.is_loading());
    }

    #[test]
    fn stale_error_does_not_clobber_fresh_data() {
        let mut remote: Remote<Vec<i32>> = Remote::idle();
        let first = remote.begin();
        let second = remote.begin();
        assert!(remote.commit(second, Ok(vec![9])));
        assert!(!remote.commit(first, Err("timeout".to_string())));
        assert_eq!(remote.data(), Some(&vec![9]));
        assert!(remote.error().is_none());
    }
}
