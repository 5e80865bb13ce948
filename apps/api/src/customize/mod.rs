// Resume customization: multipart intake, prompt templating, AI call,
// persistence of the result and cleanup of the uploaded file.
// Model calls go through llm_client only.

pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod store;
pub mod upload;

#[cfg(test)]
pub mod testing;
