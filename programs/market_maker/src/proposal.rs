//! Governance proposal adapter
//!
//! Governance hands over accepted content; this module validates it and executes it
//! as one unit of work. Market-maker proposals run their batches in a fixed order,
//! inclusions, distributions, exclusions, rejections, so that a single proposal
//! can approve a maker and pay it.

use crate::bank::BankKeeper;
use crate::context::Ctx;
use crate::instructions::*;
use crate::keeper::Keeper;
use crate::registry;
use crate::state::{IncentiveDistribution, MarketMakerHandle, ParamChange};
use mm_common::{MarketMakerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MAX_TITLE_LEN: usize = 140;
pub const MAX_DESCRIPTION_LEN: usize = 10_000;

fn validate_text(title: &str, description: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(MarketMakerError::InvalidProposal("title is empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(MarketMakerError::InvalidProposal(format!(
            "title longer than {MAX_TITLE_LEN} characters"
        )));
    }
    if description.trim().is_empty() {
        return Err(MarketMakerError::InvalidProposal("description is empty".to_string()));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(MarketMakerError::InvalidProposal(format!(
            "description longer than {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketMakerProposal {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub inclusions: Vec<MarketMakerHandle>,
    #[serde(default)]
    pub exclusions: Vec<MarketMakerHandle>,
    #[serde(default)]
    pub rejections: Vec<MarketMakerHandle>,
    #[serde(default)]
    pub distributions: Vec<IncentiveDistribution>,
}

impl MarketMakerProposal {
    /// Stateless checks; a handle may appear at most once across inclusions,
    /// exclusions and rejections. Distributions may repeat a slot.
    pub fn validate_basic(&self) -> Result<()> {
        validate_text(&self.title, &self.description)?;

        if self.inclusions.is_empty()
            && self.exclusions.is_empty()
            && self.rejections.is_empty()
            && self.distributions.is_empty()
        {
            return Err(MarketMakerError::EmptyProposal);
        }

        let mut seen = BTreeSet::new();
        let handles = self
            .inclusions
            .iter()
            .chain(&self.exclusions)
            .chain(&self.rejections);
        for handle in handles {
            handle.validate()?;
            if !seen.insert(*handle) {
                return Err(MarketMakerError::DuplicateHandle {
                    address: handle.address,
                    pair_id: handle.pair_id,
                });
            }
        }

        for distribution in &self.distributions {
            distribution.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterChangeProposal {
    pub title: String,
    pub description: String,
    pub changes: Vec<ParamChange>,
}

impl ParameterChangeProposal {
    pub fn validate_basic(&self) -> Result<()> {
        validate_text(&self.title, &self.description)?;
        if self.changes.is_empty() {
            return Err(MarketMakerError::EmptyProposal);
        }
        for change in &self.changes {
            change.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProposalContent {
    MarketMaker(MarketMakerProposal),
    ParameterChange(ParameterChangeProposal),
}

impl ProposalContent {
    pub fn title(&self) -> &str {
        match self {
            ProposalContent::MarketMaker(p) => &p.title,
            ProposalContent::ParameterChange(p) => &p.title,
        }
    }

    pub fn validate_basic(&self) -> Result<()> {
        match self {
            ProposalContent::MarketMaker(p) => p.validate_basic(),
            ProposalContent::ParameterChange(p) => p.validate_basic(),
        }
    }
}

/// Execute accepted proposal content.
///
/// Either every batch succeeds and all writes land, or the first error is
/// returned and nothing this call did is kept.
pub fn handle_proposal<B: BankKeeper>(keeper: &Keeper<B>, ctx: &mut Ctx<'_>, content: &ProposalContent) -> Result<()> {
    content.validate_basic()?;

    let res = ctx.atomic(|ctx| match content {
        ProposalContent::MarketMaker(p) => {
            process_include_many(keeper, ctx, &p.inclusions)?;
            process_distribute_many(keeper, ctx, &p.distributions)?;
            process_exclude_many(keeper, ctx, &p.exclusions)?;
            process_reject_many(keeper, ctx, &p.rejections)
        }
        ProposalContent::ParameterChange(p) => {
            let mut params = keeper.params(ctx.store())?;
            for change in &p.changes {
                change.apply_to(&mut params);
            }
            params.validate()?;
            registry::set_params(ctx.store_mut(), &params)
        }
    });

    match &res {
        Ok(()) => log::info!("proposal \"{}\" executed", content.title()),
        Err(e) => log::warn!("proposal \"{}\" failed: {}", content.title(), e),
    }
    res
}
