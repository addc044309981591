//! Search-screen driver: debounced keystrokes in, service searches out.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::config::SearchConfig;
use crate::debounce::debounce;
use crate::provider::GeocodeProvider;
use crate::service::GeocodeQueryService;

pub struct SearchSession<P> {
    service: Arc<GeocodeQueryService<P>>,
    config: SearchConfig,
}

impl<P: GeocodeProvider> SearchSession<P> {
    pub fn new(service: Arc<GeocodeQueryService<P>>, config: SearchConfig) -> Self {
        Self { service, config }
    }

    pub fn service(&self) -> &GeocodeQueryService<P> {
        &self.service
    }

    /// Run until the input channel closes.
    ///
    /// Queries shorter than the minimum length clear the prediction list
    /// right away, without waiting for the debounce; they still replace any
    /// pending query so it is never searched.
    pub async fn run(&self, mut input: mpsc::Receiver<String>) {
        let (typed_tx, typed_rx) = mpsc::channel(16);
        let mut typed = Some(typed_tx);
        let mut queries = debounce(typed_rx, self.config.debounce());

        loop {
            tokio::select! {
                next = input.recv(), if typed.is_some() => match next {
                    Some(query) => {
                        if self.is_short(&query) {
                            debug!("Query {:?} too short, clearing predictions", query);
                            self.service.search_predictions("").await;
                        }
                        if let Some(tx) = &typed {
                            let _ = tx.send(query).await;
                        }
                    }
                    None => typed = None,
                },
                next = queries.recv() => match next {
                    Some(query) if !self.is_short(&query) => {
                        self.service.search_predictions(&query).await;
                    }
                    Some(_) => {}
                    None => break,
                },
            }
        }
    }

    fn is_short(&self, query: &str) -> bool {
        query.trim().chars().count() < self.config.min_query_len
    }
}
