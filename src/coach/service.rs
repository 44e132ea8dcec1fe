//! Chat service — ties the coach endpoint to persistent chat history.

use std::sync::Arc;

use super::client::CoachApi;
use super::{ChatRecord, ChatRole, CoachContext, CoachReply, CoachRequest, fallback_message};
use crate::error::DatabaseError;
use crate::store::Database;

/// Sends coach exchanges and keeps both sides of every conversation.
///
/// With no endpoint configured (`coach: None`) the service answers purely
/// from the fallback persona, the templated mode.
pub struct ChatService {
    db: Arc<dyn Database>,
    coach: Option<Arc<dyn CoachApi>>,
}

impl ChatService {
    pub fn new(db: Arc<dyn Database>, coach: Option<Arc<dyn CoachApi>>) -> Self {
        Self { db, coach }
    }

    /// One chat exchange: persist the user's message, obtain a reply (the
    /// endpoint's, or the context's fallback on any failure), persist the
    /// reply, return it. Only a store failure surfaces as an error.
    pub async fn send(
        &self,
        user_id: &str,
        message: &str,
        context: CoachContext,
    ) -> Result<CoachReply, DatabaseError> {
        self.db
            .insert_chat_message(&ChatRecord::new(user_id, ChatRole::User, message, context))
            .await?;

        let reply_text = match &self.coach {
            Some(api) => {
                let request = CoachRequest {
                    message: message.to_string(),
                    user_id: user_id.to_string(),
                    context,
                };
                match api.send(&request).await {
                    Ok(reply) => reply.message,
                    Err(e) => {
                        tracing::warn!(user_id, context = %context, "Coach endpoint failed, using fallback: {e}");
                        fallback_message(context).to_string()
                    }
                }
            }
            None => fallback_message(context).to_string(),
        };

        self.db
            .insert_chat_message(&ChatRecord::new(
                user_id,
                ChatRole::Coach,
                &reply_text,
                context,
            ))
            .await?;

        Ok(CoachReply {
            message: reply_text,
            context: context.to_string(),
        })
    }

    /// Chat history for a user, ordered by creation time.
    pub async fn history(&self, user_id: &str) -> Result<Vec<ChatRecord>, DatabaseError> {
        self.db.list_chat_messages(user_id).await
    }

    /// Delete all chat messages for a user. Returns the number removed.
    pub async fn clear(&self, user_id: &str) -> Result<usize, DatabaseError> {
        self.db.delete_chat_messages(user_id).await
    }
}
