use crate::domain::{BatchSize, BenchmarkHost, BenchmarkMethod};

/// Renders the request body. Field names and order are fixed by the endpoint.
#[must_use]
pub fn build_payload(host: BenchmarkHost, method: BenchmarkMethod, batch_size: BatchSize) -> String {
    format!(
        "{{\"test_host\":\"{}\",\"test_method\":\"{}\",\"test_batchsize\":{}}}",
        host.wire_name(),
        method.as_str(),
        batch_size.get()
    )
}
