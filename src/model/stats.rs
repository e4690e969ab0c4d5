/// Counters collected over one run. Every classification and drop decision is counted here.
#[derive(Debug, Default)]
pub struct Stats {
    n_deployer_rows: usize,
    n_batches: usize,
    n_log_lines: usize,
    n_sends: usize,
    n_receives: usize,
    n_comments_attached: usize,
    n_comments_dropped: usize,
    n_ignored_lines: usize,
    n_malformed_skipped: usize,
    n_valuations: usize,
}

impl Stats {
    pub fn inc_deployer_rows(&mut self) {
        self.n_deployer_rows += 1;
    }

    pub fn set_batches(&mut self, n: usize) {
        self.n_batches = n;
    }

    pub fn inc_log_lines(&mut self) {
        self.n_log_lines += 1;
    }

    pub fn inc_sends(&mut self) {
        self.n_sends += 1;
    }

    pub fn inc_receives(&mut self) {
        self.n_receives += 1;
    }

    pub fn inc_comments_attached(&mut self) {
        self.n_comments_attached += 1;
    }

    pub fn inc_comments_dropped(&mut self) {
        self.n_comments_dropped += 1;
    }

    pub fn inc_ignored_lines(&mut self) {
        self.n_ignored_lines += 1;
    }

    pub fn inc_malformed_skipped(&mut self) {
        self.n_malformed_skipped += 1;
    }

    pub fn inc_valuations(&mut self) {
        self.n_valuations += 1;
    }

    pub fn deployer_rows(&self) -> usize {
        self.n_deployer_rows
    }

    pub fn batches(&self) -> usize {
        self.n_batches
    }

    pub fn log_lines(&self) -> usize {
        self.n_log_lines
    }

    pub fn transactions(&self) -> usize {
        self.n_sends + self.n_receives
    }

    pub fn comments_attached(&self) -> usize {
        self.n_comments_attached
    }

    pub fn comments_dropped(&self) -> usize {
        self.n_comments_dropped
    }

    pub fn ignored_lines(&self) -> usize {
        self.n_ignored_lines
    }

    pub fn malformed_skipped(&self) -> usize {
        self.n_malformed_skipped
    }

    pub fn valuations(&self) -> usize {
        self.n_valuations
    }

    pub fn pretty_print(&self) {
        println!("{self:#?}");
        println!();
    }
}
