use async_trait::async_trait;
use tracing::{debug, warn};

use super::local::RuleBasedSuggester;
use super::{OutfitSuggester, OutfitSuggestion, SuggestionError, SuggestionRequest};

/// Runs a primary suggester and answers with the rule-based output whenever the primary
/// fails or comes back empty. The fallback path cannot fail.
pub struct FallbackSuggester<P> {
    primary: P,
    fallback: RuleBasedSuggester,
}

impl<P> FallbackSuggester<P>
where
    P: OutfitSuggester,
{
    pub fn new(primary: P, fallback: RuleBasedSuggester) -> Self {
        Self { primary, fallback }
    }

    /// Suggests outfits and names the provider whose output was used.
    pub async fn suggest_with_source(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> (Vec<OutfitSuggestion>, &'static str) {
        match self.primary.suggest(request).await {
            Ok(suggestions) if !suggestions.is_empty() => {
                return (suggestions, self.primary.name());
            }
            Ok(_) => warn!(
                provider = self.primary.name(),
                "primary suggester returned no outfits, falling back to rules"
            ),
            Err(err) => warn!(
                provider = self.primary.name(),
                error = %err,
                "primary suggester failed, falling back to rules"
            ),
        }

        (self.fallback.generate(request), self.fallback.name())
    }
}

#[async_trait]
impl<P> OutfitSuggester for FallbackSuggester<P>
where
    P: OutfitSuggester,
{
    /// The configured primary. Logs from `suggest` name the provider that actually answered.
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn suggest(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<Vec<OutfitSuggestion>, SuggestionError> {
        let (suggestions, answered_by) = self.suggest_with_source(request).await;
        debug!(
            provider = answered_by,
            count = suggestions.len(),
            "outfit suggestions answered"
        );
        Ok(suggestions)
    }
}
