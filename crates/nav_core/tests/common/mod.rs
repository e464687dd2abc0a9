#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use nav_core::{
    selection::Collaborators, CompositionInput, ConversationView, FocusManager,
};
use shared::domain::{Channel, ChannelId, ChannelKind, GuildId, User, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    ResetConversation,
    ResetComposition,
    Display(ChannelId),
    Title(String),
    Focus(String),
}

/// Records every collaborator call in order, shared across the three surfaces.
#[derive(Clone, Default)]
pub struct SurfaceLog {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl SurfaceLog {
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            conversation: Box::new(ConversationSurface(self.clone())),
            composition: Box::new(CompositionSurface(self.clone())),
            focus: Box::new(FocusSurface(self.clone())),
        }
    }

    pub fn take(&self) -> Vec<SurfaceCall> {
        std::mem::take(&mut *self.calls.lock().expect("surface log"))
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().expect("surface log").push(call);
    }
}

struct ConversationSurface(SurfaceLog);

impl ConversationView for ConversationSurface {
    fn reset(&mut self) {
        self.0.record(SurfaceCall::ResetConversation);
    }

    fn display_conversation(&mut self, channel_id: ChannelId) {
        self.0.record(SurfaceCall::Display(channel_id));
    }

    fn set_title(&mut self, title: &str) {
        self.0.record(SurfaceCall::Title(title.to_string()));
    }
}

struct CompositionSurface(SurfaceLog);

impl CompositionInput for CompositionSurface {
    fn reset(&mut self) {
        self.0.record(SurfaceCall::ResetComposition);
    }
}

struct FocusSurface(SurfaceLog);

impl FocusManager for FocusSurface {
    fn request_focus(&mut self, surface: &str) {
        self.0.record(SurfaceCall::Focus(surface.to_string()));
    }
}

pub fn guild_channel(
    id: i64,
    kind: ChannelKind,
    name: &str,
    parent: Option<i64>,
    position: i32,
) -> Channel {
    Channel {
        id: ChannelId(id),
        kind,
        name: name.into(),
        guild_id: Some(GuildId(1)),
        parent_id: parent.map(ChannelId),
        position,
        recipients: Vec::new(),
    }
}

pub fn user(id: i64, username: &str) -> User {
    User {
        id: UserId(id),
        username: username.into(),
        discriminator: None,
        display_name: None,
    }
}
