use std::sync::Arc;
use tn_sources::NewsAggregator;

pub struct AppState {
    pub aggregator: Arc<NewsAggregator>,
}

impl AppState {
    pub fn new(aggregator: Arc<NewsAggregator>) -> Self {
        Self { aggregator }
    }
}
