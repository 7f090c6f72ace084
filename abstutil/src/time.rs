use instant::Instant;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

struct TimerSpan {
    name: String,
    started_at: Instant,
    nested_results: Vec<String>,
    nested_time: f64,
}

/// Hierarchical timing of named stages. Every `start` must be matched by a `stop` with the same
/// name. When the timer is dropped, the whole tree of results, notes and warnings is logged.
pub struct Timer {
    results: Vec<String>,
    stack: Vec<TimerSpan>,

    outermost_name: String,

    notes: Vec<String>,
    warnings: Vec<String>,
}

impl Timer {
    pub fn new<S: Into<String>>(raw_name: S) -> Timer {
        let name = raw_name.into();
        let mut t = Timer {
            results: Vec::new(),
            stack: Vec::new(),
            outermost_name: name.clone(),
            notes: Vec::new(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    /// Doesn't log anything when dropped.
    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    /// Log immediately, but also repeat at the end, to avoid having to scroll up and find
    /// interesting debug stuff.
    pub fn note<S: Into<String>>(&mut self, raw_line: S) {
        let line = raw_line.into();
        info!("{}", line);
        self.notes.push(line);
    }

    pub fn warn<S: Into<String>>(&mut self, raw_line: S) {
        let line = raw_line.into();
        warn!("{}", line);
        self.warnings.push(line);
    }

    pub fn warnings(&self) -> &Vec<String> {
        &self.warnings
    }

    /// Used to end the scope of a timer early.
    pub fn done(self) {}

    pub fn start<S: Into<String>>(&mut self, raw_name: S) {
        let name = raw_name.into();
        debug!("{}...", name);
        self.stack.push(TimerSpan {
            name,
            started_at: Instant::now(),
            nested_results: Vec::new(),
            nested_time: 0.0,
        });
    }

    pub fn stop<S: Into<String>>(&mut self, raw_name: S) {
        let name = raw_name.into();
        let span = self
            .stack
            .pop()
            .unwrap_or_else(|| panic!("stop({}) without a matching start", name));
        assert_eq!(span.name, name);
        let elapsed = elapsed_seconds(span.started_at);
        let line = format!("{} took {}", name, prettyprint_time(elapsed));
        debug!("{}", line);

        let padding = "  ".repeat(self.stack.len());
        if let Some(parent) = self.stack.last_mut() {
            parent.nested_results.push(format!("{}- {}", padding, line));
            parent.nested_results.extend(span.nested_results);
            if span.nested_time != 0.0 {
                parent.nested_results.push(format!(
                    "  {}- ... plus {}",
                    padding,
                    prettyprint_time(elapsed - span.nested_time)
                ));
            }
            parent.nested_time += elapsed;
        } else {
            self.results.push(format!("{}- {}", padding, line));
            self.results.extend(span.nested_results);
        }
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        if self.outermost_name == "throwaway" {
            return;
        }

        let stop_name = self.outermost_name.clone();

        // If we're in the middle of unwinding a panic, don't further blow up.
        match self.stack.len() {
            0 => {
                if std::thread::panicking() {
                    error!("Timer dropped with an empty stack while panicking");
                    return;
                }
                panic!("Timer dropped with an empty stack");
            }
            1 => {
                self.stop(stop_name);
            }
            _ => {
                if std::thread::panicking() {
                    error!(
                        "Timer dropped with {} unfinished spans while panicking",
                        self.stack.len()
                    );
                    return;
                }
                let names: Vec<&str> = self.stack.iter().map(|s| s.name.as_str()).collect();
                panic!("Timer dropped with unfinished spans: {:?}", names);
            }
        }

        for line in &self.results {
            info!("{}", line);
        }

        if !self.notes.is_empty() {
            info!("{} notes:", self.notes.len());
            for line in &self.notes {
                info!("{}", line);
            }
        }
        if !self.warnings.is_empty() {
            warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                warn!("{}", line);
            }
        }
    }
}
