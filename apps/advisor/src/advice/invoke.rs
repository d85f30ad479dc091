//! AI Invocation Adapter: one model call, turned into a shape or an `AdviceError`.

use crate::contract::{parse_document, parse_shape, weather, AgriculturalWeather, Shape};
use crate::errors::AdviceError;
use crate::llm_client::prompts::Prompt;
use crate::llm_client::{GenerationRequest, GenerativeModel};

/// Calls the model with `T`'s response schema and parses the reply strictly.
pub async fn invoke_shape<T: Shape>(
    model: &dyn GenerativeModel,
    prompt: &Prompt,
) -> Result<T, AdviceError> {
    let request = GenerationRequest::json(prompt, Some(T::response_schema()));
    let text = request_text(model, &request).await?;
    Ok(parse_shape::<T>(&text)?)
}

/// JSON mode without a schema; any JSON object is accepted.
pub async fn invoke_weather_object(
    model: &dyn GenerativeModel,
    prompt: &Prompt,
) -> Result<AgriculturalWeather, AdviceError> {
    let request = GenerationRequest::json(prompt, None);
    let text = request_text(model, &request).await?;
    let value = parse_document(weather::SHAPE_NAME, &text)?;
    Ok(AgriculturalWeather::from_json(value)?)
}

/// Plain-text mode. Returns the prose as-is.
pub async fn invoke_text(model: &dyn GenerativeModel, prompt: &Prompt) -> Result<String, AdviceError> {
    request_text(model, &GenerationRequest::plain(prompt)).await
}

async fn request_text(
    model: &dyn GenerativeModel,
    request: &GenerationRequest,
) -> Result<String, AdviceError> {
    let text = model.generate(request).await?;
    if text.trim().is_empty() {
        return Err(AdviceError::EmptyResponse);
    }
    Ok(text)
}
