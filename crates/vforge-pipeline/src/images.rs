//! Bounded-parallel image batch generation.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use vforge_models::ContentFormat;
use vforge_providers::{ImageFile, ImageGenerator, ProviderError};

/// Per-prompt outcome of a batch.
#[derive(Debug)]
pub struct ImageOutcome {
    /// Position within the prompt sequence
    pub index: u32,
    /// Prompt the image was (or would have been) generated from
    pub prompt: String,
    pub result: Result<ImageFile, ProviderError>,
}

/// Generate one image per prompt, at most `concurrency` in flight.
///
/// One failed image never fails the batch; every prompt gets an
/// outcome, in prompt order, and the caller decides what a partial
/// batch means.
pub async fn generate_batch(
    generator: Arc<dyn ImageGenerator>,
    script: &str,
    prompts: &[String],
    format: ContentFormat,
    concurrency: usize,
) -> Vec<ImageOutcome> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let tasks = prompts.iter().enumerate().map(|(i, prompt)| {
        let generator = Arc::clone(&generator);
        let semaphore = Arc::clone(&semaphore);
        let script = script.to_string();
        let prompt = prompt.clone();
        async move {
            // The semaphore is never closed while we hold it.
            let _permit = semaphore.acquire().await.ok();
            let result = generator
                .generate(&script, &prompt, i as u32, format)
                .await;
            ImageOutcome {
                index: i as u32,
                prompt,
                result,
            }
        }
    });

    join_all(tasks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGenerator {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        fail_index: Option<u32>,
    }

    #[async_trait]
    impl ImageGenerator for CountingGenerator {
        async fn generate(
            &self,
            _script: &str,
            prompt: &str,
            index: u32,
            _format: ContentFormat,
        ) -> Result<ImageFile, ProviderError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_index == Some(index) {
                return Err(ProviderError::generation(format!("bad prompt: {prompt}")));
            }
            Ok(ImageFile {
                file_path: format!("/tmp/img_{index}.png"),
                file_size_bytes: 1024,
                resolution: "1024x1792".to_string(),
            })
        }
    }

    fn prompts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("prompt {i}")).collect()
    }

    #[tokio::test]
    async fn test_batch_respects_concurrency_bound() {
        let generator = Arc::new(CountingGenerator {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            fail_index: None,
        });
        let outcomes = generate_batch(
            generator.clone(),
            "script",
            &prompts(8),
            ContentFormat::Short,
            2,
        )
        .await;

        assert_eq!(outcomes.len(), 8);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        assert!(generator.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_outcomes() {
        let generator = Arc::new(CountingGenerator {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            fail_index: Some(1),
        });
        let outcomes = generate_batch(
            generator,
            "script",
            &prompts(3),
            ContentFormat::Long,
            4,
        )
        .await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
        // Outcomes stay in prompt order regardless of completion order.
        assert_eq!(outcomes[2].index, 2);
    }

    #[tokio::test]
    async fn test_empty_prompt_list() {
        let generator = Arc::new(CountingGenerator {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            fail_index: None,
        });
        let outcomes =
            generate_batch(generator, "script", &[], ContentFormat::Short, 4).await;
        assert!(outcomes.is_empty());
    }
}
