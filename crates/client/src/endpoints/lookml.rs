//! LookML model and explore endpoints.

use reqwest::Client;

use crate::endpoints::encode_segment;
use crate::endpoints::request::{authorized, decode, send_request};
use crate::error::Result;
use crate::models::{LookmlModel, LookmlModelExplore};

pub async fn list_lookml_models(
    client: &Client,
    base_url: &str,
    auth_token: &str,
) -> Result<Vec<LookmlModel>> {
    let url = format!("{base_url}/lookml_models");
    let response = send_request(
        authorized(client.get(&url), auth_token),
        "/lookml_models",
        "GET",
    )
    .await?;
    decode(response, "/lookml_models").await
}

pub async fn get_lookml_model(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    model: &str,
) -> Result<LookmlModel> {
    let url = format!("{base_url}/lookml_models/{}", encode_segment(model));
    let response = send_request(
        authorized(client.get(&url), auth_token),
        "/lookml_models/{model}",
        "GET",
    )
    .await?;
    decode(response, "/lookml_models/{model}").await
}

pub async fn get_lookml_model_explore(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    model: &str,
    explore: &str,
) -> Result<LookmlModelExplore> {
    let url = format!(
        "{base_url}/lookml_models/{}/explores/{}",
        encode_segment(model),
        encode_segment(explore)
    );
    let response = send_request(
        authorized(client.get(&url), auth_token),
        "/lookml_models/{model}/explores/{explore}",
        "GET",
    )
    .await?;
    decode(response, "/lookml_models/{model}/explores/{explore}").await
}
