pub mod caption;
pub mod client;
pub mod creative;
pub mod types;

pub use caption::GeminiCaptionClient;
pub use creative::GeminiCreativeClient;

/// Generates a test-only `with_base_url` forwarder so wiremock tests can
/// point a client at a local server.
#[cfg(test)]
macro_rules! impl_with_gemini_base_url {
    ($client:ty) => {
        impl $client {
            fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}

#[cfg(test)]
pub(crate) use impl_with_gemini_base_url;
