//! Environment source: `LEMONSQUEEZY_BASE_URL`, `LEMONSQUEEZY_API_KEY`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(Environment::with_prefix("LEMONSQUEEZY"))
}
