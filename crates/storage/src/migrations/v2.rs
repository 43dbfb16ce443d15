//! Migration v2: lookup indexes for domain reads and result history

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_sessions_domain ON sessions(domain);
CREATE INDEX IF NOT EXISTS idx_results_session ON optimization_results(session_id);
";
