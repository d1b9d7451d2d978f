use serde::Serialize;

/// A Data API endpoint: its path under the client's base URL, the query it
/// takes and the body it answers with.
pub trait Method {
    const PATH: &'static str;

    type Response: serde::de::DeserializeOwned;
    type Params: Serialize;
}
