//! Reactions on posts.

use crate::{ApiClient, HttpMethod, IdentityResolver, encode_urn};
use linkedin_core::{ReactionRecord, ReactionSummary, ReactionType, Urn};
use linkedin_error::LinkedInResult;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Deserialize)]
struct ReactionList {
    #[serde(default)]
    elements: Vec<ReactionElement>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReactionElement {
    reaction_type: String,
    created: Option<AuditStamp>,
    actor: Option<String>,
}

#[derive(Deserialize)]
struct AuditStamp {
    actor: Option<String>,
}

/// Adds, removes and lists reactions as the token's owner.
#[derive(Debug)]
pub struct ReactionService {
    client: Arc<ApiClient>,
    identity: Arc<IdentityResolver>,
}

impl ReactionService {
    /// Creates the service.
    pub fn new(client: Arc<ApiClient>, identity: Arc<IdentityResolver>) -> Self {
        Self { client, identity }
    }

    /// Sets this member's reaction on a post, replacing any earlier one.
    ///
    /// The platform answers 409 when a reaction already exists; that one is
    /// removed and the new type applied. If that second apply fails the
    /// post is left with no reaction from this member.
    #[instrument(skip(self))]
    pub async fn add_reaction(
        &self,
        post_urn: &Urn,
        reaction_type: ReactionType,
    ) -> LinkedInResult<ReactionRecord> {
        let actor = self.identity.current().await?;
        let body = json!({ "root": post_urn, "reactionType": reaction_type.to_string() });
        let query = [("actor", actor.urn().as_str())];

        match self
            .client
            .send(HttpMethod::Post, "/reactions", Some(body.clone()), &query)
            .await
        {
            Ok(_) => {}
            Err(err) if err.kind().status() == Some(409) => {
                debug!(%post_urn, "Reaction exists, replacing");
                self.delete(actor.urn(), post_urn).await?;
                if let Err(err) = self
                    .client
                    .send(HttpMethod::Post, "/reactions", Some(body), &query)
                    .await
                {
                    warn!(
                        %post_urn,
                        error = %err.kind(),
                        "Earlier reaction was removed but the new one was not applied"
                    );
                    return Err(err);
                }
            }
            Err(err) => return Err(err),
        }
        info!(%post_urn, %reaction_type, "Reaction set");
        Ok(ReactionRecord::new(
            post_urn.clone(),
            actor.urn().clone(),
            reaction_type,
        ))
    }

    /// Removes this member's reaction from a post.
    #[instrument(skip(self))]
    pub async fn remove_reaction(&self, post_urn: &Urn) -> LinkedInResult<()> {
        let actor = self.identity.current().await?;
        self.delete(actor.urn(), post_urn).await?;
        info!(%post_urn, "Reaction removed");
        Ok(())
    }

    /// Reactions on a post with per-type counts.
    #[instrument(skip(self))]
    pub async fn get_reactions(&self, post_urn: &Urn) -> LinkedInResult<ReactionSummary> {
        let list = self
            .client
            .send(
                HttpMethod::Get,
                "/reactions",
                None,
                &[("q", "entity"), ("entity", post_urn.as_str())],
            )
            .await?
            .decode::<ReactionList>()?;

        let records = list
            .elements
            .into_iter()
            .filter_map(|element| {
                let reaction_type = element.reaction_type.parse::<ReactionType>().ok()?;
                let actor = element
                    .created
                    .and_then(|c| c.actor)
                    .or(element.actor)
                    .and_then(|a| Urn::parse(a).ok())?;
                Some(ReactionRecord::new(post_urn.clone(), actor, reaction_type))
            })
            .collect();
        Ok(ReactionSummary::from_records(post_urn.clone(), records))
    }

    async fn delete(&self, actor: &Urn, post_urn: &Urn) -> LinkedInResult<()> {
        let path = format!(
            "/reactions/(actor:{},entity:{})",
            encode_urn(actor),
            encode_urn(post_urn)
        );
        self.client
            .send(HttpMethod::Delete, &path, None, &[])
            .await
            .map(|_| ())
    }
}
