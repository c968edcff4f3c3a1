//! Business logic services.

#![allow(missing_docs)]

pub mod assistant;
pub mod auth;
pub mod calendar;
pub mod catalog;
pub mod content;
pub mod media;
pub mod membership;
pub mod poll;
pub mod reorder;
pub mod suggestion;
pub mod ticker;

pub use assistant::{
    AssistantReply, AssistantService, GeminiClient, Generation, GenerationRequest,
    GenerativeClient, Grounding, SourceLink,
};
pub use auth::{AuthService, SignInInput, SsoInput};
pub use calendar::{event_to_ics, ics_filename, parse_event_date};
pub use catalog::{Catalog, CatalogEntry};
pub use content::{Actor, ContentService};
pub use media::MediaService;
pub use membership::{MembershipService, RegisterMemberInput, VerificationChannel};
pub use poll::PollService;
pub use reorder::{ContentKind, DragSession, ReorderService, move_item};
pub use suggestion::SuggestionService;
pub use ticker::TickerService;
