use acdc_bench::error::AppResult;

fn main() -> AppResult<()> {
    acdc_bench::entry::run()
}
