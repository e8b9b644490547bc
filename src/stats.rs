use std::time::{Duration, Instant};

/// What a single rendered frame contained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub generation: usize,
    /// Live cells in the newest generation
    pub alive: usize,
    /// Cubes drawn across every retained layer
    pub cubes: usize,
}

pub trait Recorder {
    fn record(&mut self, frame: FrameStats);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> String;
}

pub struct SimpleRecord {
    total: usize,
    frames: usize,
    last: FrameStats,
    frames_in_report: usize,
    last_report: Instant,
    interval: Duration,
}
impl SimpleRecord {
    /// A recorder for a run of `total` frames, reporting at most every 500ms
    pub fn new(total: usize) -> Self {
        Self::with_interval(total, Duration::from_millis(500))
    }

    pub fn with_interval(total: usize, interval: Duration) -> Self {
        Self {
            total,
            frames: 0,
            last: FrameStats::default(),
            frames_in_report: 0,
            last_report: Instant::now(),
            interval,
        }
    }

    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }
}
impl Recorder for SimpleRecord {
    fn record(&mut self, frame: FrameStats) {
        self.frames += 1;
        self.frames_in_report += 1;
        self.last = frame;
    }

    fn has_report(&self) -> bool {
        self.frames_in_report > 0
            && (self.last_report.elapsed() >= self.interval || self.frames == self.total)
    }
    fn report(&mut self) -> String {
        let frames_per_sec = self.frames_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset stats for next report
        self.last_report = Instant::now();
        self.frames_in_report = 0;

        format!(
            "rendering frame {} of {} ({:.02}frame/s) alive:{} cubes:{}",
            self.frames, self.total, frames_per_sec, self.last.alive, self.last.cubes
        )
    }
}

pub struct CsvRecord {
    inner: SimpleRecord,
    data: Vec<(u128, FrameStats)>,
    last: Instant,
}
impl CsvRecord {
    pub fn new(total: usize) -> Self {
        Self {
            inner: SimpleRecord::new(total),
            data: Vec::with_capacity(total),
            last: Instant::now(),
        }
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }

    fn write_to<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        out.write_all(b"generation,delta_us,alive,cubes\n")?;
        for (delta, frame) in &self.data {
            let line = format!("{},{},{},{}\n", frame.generation, delta, frame.alive, frame.cubes);
            out.write_all(line.as_bytes())?;
        }
        out.flush()
    }
}
impl Recorder for CsvRecord {
    fn record(&mut self, frame: FrameStats) {
        let delta = self.last.elapsed().as_micros();
        self.last = Instant::now();

        self.data.push((delta, frame));
        self.inner.record(frame);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> String {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvRecord),
    Simple(SimpleRecord),
}
impl SwitchRecorder {
    pub fn new(total: usize, csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new(total))
        } else {
            Self::Simple(SimpleRecord::new(total))
        }
    }

    /// Writes the CSV; a no-op when not recording one
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Simple(_) => Ok(()),
        }
    }
}
impl Recorder for SwitchRecorder {
    fn record(&mut self, frame: FrameStats) {
        match self {
            Self::Csv(r) => r.record(frame),
            Self::Simple(r) => r.record(frame),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Csv(r) => r.has_report(),
            Self::Simple(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> String {
        match self {
            Self::Csv(r) => r.report(),
            Self::Simple(r) => r.report(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(generation: usize) -> FrameStats {
        FrameStats {
            generation,
            alive: generation * 2,
            cubes: generation * 3,
        }
    }

    #[test]
    fn last_frame_always_reports() {
        let mut stats = SimpleRecord::with_interval(2, Duration::from_secs(3600));
        stats.record(frame(0));
        assert!(!stats.has_report());

        stats.record(frame(1));
        assert!(stats.has_report());
        let report = stats.report();
        assert!(report.starts_with("rendering frame 2 of 2"), "{report}");
        assert!(report.ends_with("alive:2 cubes:3"), "{report}");
        assert!(!stats.has_report());
    }

    #[test]
    fn csv_lists_every_frame() {
        let mut stats = CsvRecord::new(3);
        for i in 0..3 {
            stats.record(frame(i));
        }

        let mut out = Vec::new();
        stats.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "generation,delta_us,alive,cubes");
        assert!(lines[3].starts_with("2,") && lines[3].ends_with(",4,6"));
    }

    #[test]
    fn simple_recorder_saves_nothing() {
        let stats = SwitchRecorder::new(1, false);

        assert!(stats.save("/nonexistent/dir/stats.csv").is_ok());
    }
}
