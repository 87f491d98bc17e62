//! Catalog reads and the point creation call over the Crux HTTP capability.
//!
//! Completions are mapped to domain results inside the callbacks, so events
//! never carry transport types.

use crux_http::Http;
use tracing::debug;

use crate::catalog::{self, CatalogError, CityDto, Item, StateDto};
use crate::config::Endpoints;
use crate::event::Event;
use crate::model::ScreenId;
use crate::region::CityRequest;
use crate::submission::{SubmissionError, SubmissionId, SubmissionPayload};

pub type HttpCapability = Http<Event>;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

pub fn load_items(http: &HttpCapability, endpoints: &Endpoints, screen: ScreenId) {
    let url = endpoints.items();
    debug!(%url, "loading items");
    http.get(url.as_str())
        .expect_json::<Vec<Item>>()
        .send(move |result| Event::ItemsLoaded {
            screen,
            result: json_body(result),
        });
}

pub fn load_states(http: &HttpCapability, endpoints: &Endpoints, screen: ScreenId) {
    let url = endpoints.states();
    debug!(%url, "loading states");
    http.get(url.as_str())
        .expect_json::<Vec<StateDto>>()
        .send(move |result| Event::StatesLoaded {
            screen,
            result: json_body(result).map(catalog::states_from_wire),
        });
}

pub fn load_cities(
    http: &HttpCapability,
    endpoints: &Endpoints,
    screen: ScreenId,
    request: CityRequest,
) {
    let url = endpoints.cities(&request.state);
    debug!(%url, generation = request.generation, "loading cities");
    http.get(url.as_str())
        .expect_json::<Vec<CityDto>>()
        .send(move |result| Event::CitiesLoaded {
            screen,
            request,
            result: json_body(result).map(catalog::cities_from_wire),
        });
}

/// Issues the single create request for `payload`.
pub fn create_point(
    http: &HttpCapability,
    endpoints: &Endpoints,
    screen: ScreenId,
    id: SubmissionId,
    payload: &SubmissionPayload,
) -> Result<(), SubmissionError> {
    let body = serde_json::to_vec(payload).map_err(|e| SubmissionError::Encoding {
        message: e.to_string(),
    })?;

    let url = endpoints.points();
    debug!(%url, submission = %id, "creating point");
    http.post(url.as_str())
        .header("Content-Type", "application/json")
        .header(IDEMPOTENCY_KEY_HEADER, id.as_str())
        .body(body)
        .send(move |result| Event::SubmissionSettled {
            screen,
            id,
            result: creation_status(result),
        });

    Ok(())
}

fn json_body<T>(result: crux_http::Result<crux_http::Response<T>>) -> Result<T, CatalogError> {
    let mut response = result.map_err(|e| CatalogError::Transport {
        message: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.into(),
        });
    }

    response.take_body().ok_or(CatalogError::MalformedBody)
}

fn creation_status(
    result: crux_http::Result<crux_http::Response<Vec<u8>>>,
) -> Result<(), SubmissionError> {
    let response = result.map_err(|e| SubmissionError::Transport {
        message: e.to_string(),
    })?;

    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(SubmissionError::Rejected {
            status: status.into(),
        })
    }
}
