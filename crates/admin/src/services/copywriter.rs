//! AI copywriting for the admin product form.
//!
//! Wraps a [`TextGenerator`] and never surfaces generation failures to the
//! caller: descriptions degrade to fixed Arabic messages and marketing posts
//! to an empty string. Only one generation runs at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{instrument, warn};

use crate::claude::TextGenerator;

/// Description returned when no API key is configured.
pub const NOT_CONFIGURED: &str = "يرجى ضبط مفتاح API لتفعيل هذه الميزة.";

/// Description returned when the model answers with no text.
pub const EMPTY_DESCRIPTION: &str = "تعذر إنشاء الوصف تلقائياً.";

/// Description returned when the request fails.
pub const GENERATION_FAILED: &str = "حدث خطأ أثناء توليد الوصف.";

/// Category sent to the model when the form has none.
pub const DEFAULT_PROMPT_CATEGORY: &str = "General";

/// Features sent to the model when none are given.
pub const DEFAULT_FEATURES: &str = "جودة عالية، سعر مناسب، تصميم عصري";

/// Errors the copywriter reports instead of generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CopywriterError {
    /// A description needs a product name.
    #[error("يرجى إدخال اسم المنتج أولاً")]
    MissingName,
    /// Another generation has not finished yet.
    #[error("a generation is already in progress")]
    Busy,
}

/// Product copy generator shared by all admin requests.
#[derive(Clone)]
pub struct Copywriter {
    inner: Arc<CopywriterInner>,
}

struct CopywriterInner {
    generator: Option<Arc<dyn TextGenerator>>,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for Copywriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Copywriter")
            .field("configured", &self.is_configured())
            .field("busy", &self.is_busy())
            .finish()
    }
}

impl Copywriter {
    /// Create a copywriter; `None` means no API key is configured.
    #[must_use]
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            inner: Arc::new(CopywriterInner {
                generator,
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// A copywriter without a backend; every call returns its fallback.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.generator.is_some()
    }

    /// Whether a generation is currently running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Write a product description.
    ///
    /// A blank category or feature list falls back to
    /// [`DEFAULT_PROMPT_CATEGORY`] and [`DEFAULT_FEATURES`]. Failures come
    /// back as [`NOT_CONFIGURED`], [`EMPTY_DESCRIPTION`] or
    /// [`GENERATION_FAILED`].
    ///
    /// # Errors
    ///
    /// Returns [`CopywriterError::MissingName`] for a blank name and
    /// [`CopywriterError::Busy`] while another generation runs.
    #[instrument(skip(self, features))]
    pub async fn generate_description(
        &self,
        name: &str,
        category: Option<&str>,
        features: Option<&str>,
    ) -> Result<String, CopywriterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CopywriterError::MissingName);
        }
        let Some(generator) = self.inner.generator.clone() else {
            return Ok(NOT_CONFIGURED.to_string());
        };

        let category = non_blank(category).unwrap_or(DEFAULT_PROMPT_CATEGORY);
        let features = non_blank(features).unwrap_or(DEFAULT_FEATURES);
        let prompt = description_prompt(name, category, features);

        let text = match self.run(generator, prompt).await? {
            Some(text) if !text.is_empty() => text,
            Some(_) => EMPTY_DESCRIPTION.to_string(),
            None => GENERATION_FAILED.to_string(),
        };
        Ok(text)
    }

    /// Write a short social media post for a product.
    ///
    /// Returns an empty string when not configured or on any failure.
    ///
    /// # Errors
    ///
    /// Returns [`CopywriterError::Busy`] while another generation runs.
    #[instrument(skip(self))]
    pub async fn suggest_marketing_post(&self, product_name: &str) -> Result<String, CopywriterError> {
        let product_name = product_name.trim();
        let Some(generator) = self.inner.generator.clone() else {
            return Ok(String::new());
        };
        if product_name.is_empty() {
            return Ok(String::new());
        }

        let prompt = marketing_prompt(product_name);
        Ok(self.run(generator, prompt).await?.unwrap_or_default())
    }

    /// Run one generation to completion on its own task.
    ///
    /// The task keeps running if the caller goes away, and holds the
    /// in-flight flag until it finishes. `None` means the generation failed.
    async fn run(
        &self,
        generator: Arc<dyn TextGenerator>,
        prompt: String,
    ) -> Result<Option<String>, CopywriterError> {
        let guard = InFlight::acquire(&self.inner)?;

        let task = tokio::spawn(async move {
            let _guard = guard;
            generator.generate(prompt).await
        });

        let text = match task.await {
            Ok(Ok(text)) => Some(text.trim().to_string()),
            Ok(Err(e)) => {
                warn!(error = %e, "Text generation failed");
                None
            }
            Err(e) => {
                warn!(error = %e, "Text generation task did not complete");
                None
            }
        };
        Ok(text)
    }
}

/// Holds the in-flight flag until dropped.
struct InFlight(Arc<CopywriterInner>);

impl InFlight {
    fn acquire(inner: &Arc<CopywriterInner>) -> Result<Self, CopywriterError> {
        inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CopywriterError::Busy)?;
        Ok(Self(Arc::clone(inner)))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.in_flight.store(false, Ordering::Release);
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn description_prompt(name: &str, category: &str, features: &str) -> String {
    format!(
        "You are a professional e-commerce copywriter. Write a compelling, \
         SEO-friendly product description in Arabic.\n\n\
         Product name: {name}\n\
         Category: {category}\n\
         Key features: {features}\n\n\
         Keep the tone exciting and professional, at most 100 words. \
         Reply with the description text only."
    )
}

fn marketing_prompt(product_name: &str) -> String {
    format!(
        "Write a short, engaging social media post in Arabic (for Facebook or \
         Instagram) that sells this product: {product_name}. Include relevant \
         hashtags. Reply with the post text only."
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    use super::*;
    use crate::claude::ClaudeError;

    /// Answers every prompt with a fixed reply and remembers the prompts.
    struct Scripted {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(529),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: String) -> Result<String, ClaudeError> {
            self.prompts.lock().unwrap().push(prompt);
            self.reply.clone().map_err(|status| ClaudeError::Api {
                error_type: "overloaded_error".to_string(),
                message: format!("status {status}"),
            })
        }
    }

    /// Blocks until the test releases a permit.
    struct Gated(Semaphore);

    #[async_trait]
    impl TextGenerator for Gated {
        async fn generate(&self, _prompt: String) -> Result<String, ClaudeError> {
            let _permit = self.0.acquire().await;
            Ok("نص".to_string())
        }
    }

    #[tokio::test]
    async fn test_description_not_configured() {
        let writer = Copywriter::disabled();
        let text = writer
            .generate_description("ساعة", None, None)
            .await
            .unwrap();
        assert_eq!(text, NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_description_requires_name() {
        let writer = Copywriter::new(Some(Scripted::answering("x")));
        let err = writer.generate_description("  ", None, None).await;
        assert_eq!(err, Err(CopywriterError::MissingName));
    }

    #[tokio::test]
    async fn test_description_uses_defaults_in_prompt() {
        let generator = Scripted::answering("  وصف جميل  ");
        let writer = Copywriter::new(Some(generator.clone()));

        let text = writer
            .generate_description("حقيبة", Some(" "), None)
            .await
            .unwrap();
        assert_eq!(text, "وصف جميل");

        let prompts = generator.prompts.lock().unwrap();
        let prompt = prompts.first().unwrap();
        assert!(prompt.contains("Product name: حقيبة"));
        assert!(prompt.contains(&format!("Category: {DEFAULT_PROMPT_CATEGORY}")));
        assert!(prompt.contains(DEFAULT_FEATURES));
    }

    #[tokio::test]
    async fn test_description_empty_reply() {
        let writer = Copywriter::new(Some(Scripted::answering("\n  ")));
        let text = writer
            .generate_description("عطر", Some("عطور"), None)
            .await
            .unwrap();
        assert_eq!(text, EMPTY_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_description_failure() {
        let writer = Copywriter::new(Some(Scripted::failing()));
        let text = writer
            .generate_description("عطر", Some("عطور"), Some("ثبات عالٍ"))
            .await
            .unwrap();
        assert_eq!(text, GENERATION_FAILED);
        assert!(!writer.is_busy());
    }

    #[tokio::test]
    async fn test_marketing_post_fallbacks() {
        let writer = Copywriter::disabled();
        assert_eq!(writer.suggest_marketing_post("حذاء").await.unwrap(), "");

        let writer = Copywriter::new(Some(Scripted::failing()));
        assert_eq!(writer.suggest_marketing_post("حذاء").await.unwrap(), "");

        let generator = Scripted::answering("اشترِ الآن! #تخفيضات");
        let writer = Copywriter::new(Some(generator.clone()));
        assert_eq!(
            writer.suggest_marketing_post("حذاء").await.unwrap(),
            "اشترِ الآن! #تخفيضات"
        );
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts.first().unwrap().contains("حذاء"));
    }

    #[tokio::test]
    async fn test_second_generation_is_rejected_while_busy() {
        let generator = Arc::new(Gated(Semaphore::new(0)));
        let writer = Copywriter::new(Some(generator.clone()));

        let first = tokio::spawn({
            let writer = writer.clone();
            async move { writer.generate_description("ساعة", None, None).await }
        });

        while !writer.is_busy() {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            writer.suggest_marketing_post("ساعة").await,
            Err(CopywriterError::Busy)
        );

        generator.0.add_permits(1);
        assert_eq!(first.await.unwrap().unwrap(), "نص");
        assert!(!writer.is_busy());
    }
}
