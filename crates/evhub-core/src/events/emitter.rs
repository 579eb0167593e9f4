//! Emitter trait: lets an owner that embeds an `EventHub` expose it under
//! its own subscribe/publish vocabulary.

use super::dispatcher::EventHub;
use super::handler::{IntoListenerResult, ListenerId};
use super::report::DispatchReport;
use super::types::HubEvent;
use crate::errors::HubError;

/// Implemented by types that own an event hub.
///
/// Only `hub` is required; the provided methods forward to it. A shared
/// process-wide bus is just an `Arc<EventHub<E>>` handed to collaborators,
/// which is why `EventHub` itself implements this trait.
pub trait Emitter {
    type Event: HubEvent;

    fn hub(&self) -> &EventHub<Self::Event>;

    fn subscribe<F, R>(&self, name: <Self::Event as HubEvent>::Name, listener: F) -> ListenerId
    where
        F: Fn(&Self::Event) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        self.hub().on(name, listener)
    }

    fn subscribe_once<F, R>(&self, name: <Self::Event as HubEvent>::Name, listener: F) -> ListenerId
    where
        F: Fn(&Self::Event) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        self.hub().once(name, listener)
    }

    fn unsubscribe(&self, name: &<Self::Event as HubEvent>::Name, id: ListenerId) -> bool {
        self.hub().off(name, id)
    }

    fn publish(&self, event: &Self::Event) -> Result<DispatchReport, HubError> {
        self.hub().notify(event)
    }
}

impl<E: HubEvent> Emitter for EventHub<E> {
    type Event = E;

    fn hub(&self) -> &EventHub<E> {
        self
    }
}
