//! In-process chain: the store, the program keeper and its invariant routes

use crate::snapshot::ChainSnapshot;
use anyhow::{Context, Result};
use mm_program::{
    handle_msg, handle_proposal, register_invariants, Ctx, Event, InvariantRegistry, Keeper, MemStore, Msg,
    ProposalContent, StoreBank,
};

pub struct Chain {
    pub store: MemStore,
    pub keeper: Keeper<StoreBank>,
    pub invariants: InvariantRegistry<StoreBank>,
    events: Vec<Event>,
}

impl Chain {
    pub fn from_snapshot(snapshot: &ChainSnapshot) -> Result<Self> {
        let keeper = Keeper::new(StoreBank);
        let store = snapshot.load(&keeper)?;
        let mut invariants = InvariantRegistry::new();
        register_invariants(&mut invariants);
        Ok(Self {
            store,
            keeper,
            invariants,
            events: Vec::new(),
        })
    }

    pub fn execute_proposal(&mut self, content: &ProposalContent) -> Result<()> {
        let mut ctx = Ctx::new(&mut self.store, &mut self.events);
        handle_proposal(&self.keeper, &mut ctx, content)
            .context(format!("Proposal \"{}\" failed", content.title()))
    }

    pub fn execute_msg(&mut self, msg: &Msg) -> Result<()> {
        let mut ctx = Ctx::new(&mut self.store, &mut self.events);
        handle_msg(&self.keeper, &mut ctx, msg).context("Message failed")
    }

    /// Messages of every broken invariant route
    pub fn audit(&self) -> Vec<String> {
        self.invariants.assert_all(&self.keeper, &self.store)
    }

    /// Hand over the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Result<ChainSnapshot> {
        ChainSnapshot::export(&self.keeper, &self.store)
    }
}
