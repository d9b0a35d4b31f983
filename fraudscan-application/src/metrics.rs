use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    uploads: AtomicU64,
    upload_rejections: AtomicU64,
    rows_written: AtomicU64,
    fraud_flags: AtomicU64,
    processing_errors: AtomicU64,
    result_queries: AtomicU64,
}

impl Metrics {
    pub fn record_upload(&self, rows_written: usize, fraud_flags: usize) {
        self.uploads.fetch_add(1, Ordering::Relaxed);
        self.rows_written
            .fetch_add(rows_written as u64, Ordering::Relaxed);
        self.fraud_flags
            .fetch_add(fraud_flags as u64, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.upload_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_processing_error(&self) {
        self.processing_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_result_query(&self) {
        self.result_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let uploads = self.uploads.load(Ordering::Relaxed);
        let rejections = self.upload_rejections.load(Ordering::Relaxed);
        let rows = self.rows_written.load(Ordering::Relaxed);
        let fraud = self.fraud_flags.load(Ordering::Relaxed);
        let errors = self.processing_errors.load(Ordering::Relaxed);
        let queries = self.result_queries.load(Ordering::Relaxed);

        format!(
            "# TYPE fraudscan_uploads_total counter\n\
fraudscan_uploads_total {}\n\
# TYPE fraudscan_upload_rejections_total counter\n\
fraudscan_upload_rejections_total {}\n\
# TYPE fraudscan_rows_written_total counter\n\
fraudscan_rows_written_total {}\n\
# TYPE fraudscan_fraud_flags_total counter\n\
fraudscan_fraud_flags_total {}\n\
# TYPE fraudscan_processing_errors_total counter\n\
fraudscan_processing_errors_total {}\n\
# TYPE fraudscan_result_queries_total counter\n\
fraudscan_result_queries_total {}\n",
            uploads, rejections, rows, fraud, errors, queries
        )
    }
}
