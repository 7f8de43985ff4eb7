//! Screen composition: resolved slots with their rendered cards.

use crate::display::{humanize, SlotDisplay};
use crate::ids::{AllianceId, ContractId};
use crate::ordering::group_by_category;
use crate::render::{render, ActionCommand, RenderContext, RenderedAction};
use crate::slots::{resolve_slots, SlotContent};
use crate::snapshot::{Contract, ContractStatus, SlotContentType};

#[derive(Debug, Clone, PartialEq)]
pub struct ActionGroup {
    pub category: Option<String>,
    pub actions: Vec<RenderedAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContractCard {
    pub id: ContractId,
    pub title: String,
    pub status: ContractStatus,
    pub progress: f64,
    pub progress_label: String,
}

impl ContractCard {
    fn from_contract(contract: &Contract) -> Self {
        let title = contract
            .kind
            .as_deref()
            .map(humanize)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Contract".to_string());
        Self {
            id: contract.id.clone(),
            title,
            status: contract.status,
            progress: contract.progress(),
            progress_label: format!(
                "{}/{}",
                contract.actions_completed, contract.actions_required
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotBody {
    Actions(Vec<ActionGroup>),
    Contracts {
        content_type: SlotContentType,
        contracts: Vec<ContractCard>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlot {
    pub id: String,
    pub display: SlotDisplay,
    pub body: SlotBody,
}

impl RenderedSlot {
    /// All rendered actions in display order, flattening category groups.
    pub fn actions(&self) -> impl Iterator<Item = &RenderedAction> {
        let groups: &[ActionGroup] = match &self.body {
            SlotBody::Actions(groups) => groups,
            SlotBody::Contracts { .. } => &[],
        };
        groups.iter().flat_map(|g| g.actions.iter())
    }
}

/// Incoming alliance proposal with its two possible answers.
#[derive(Debug, Clone, PartialEq)]
pub struct AllianceRequestCard {
    pub id: AllianceId,
    pub proposer: String,
    pub accept: ActionCommand,
    pub decline: ActionCommand,
}

/// Render every slot that has content, in server order.
pub fn render_slots(ctx: &RenderContext<'_>) -> Vec<RenderedSlot> {
    resolve_slots(ctx.snapshot)
        .into_iter()
        .map(|(slot, content)| {
            let body = match content {
                SlotContent::Actions(entries) => SlotBody::Actions(
                    group_by_category(entries)
                        .into_iter()
                        .map(|group| ActionGroup {
                            category: group.category.map(str::to_string),
                            actions: group
                                .entries
                                .iter()
                                .map(|entry| render(entry.key, entry.action, ctx))
                                .collect(),
                        })
                        .collect(),
                ),
                SlotContent::Contracts(contracts) => SlotBody::Contracts {
                    content_type: slot.content_type,
                    contracts: contracts
                        .into_iter()
                        .map(ContractCard::from_contract)
                        .collect(),
                },
                SlotContent::Empty => SlotBody::Actions(Vec::new()),
            };
            RenderedSlot {
                id: slot.id.clone(),
                display: SlotDisplay::resolve(slot),
                body,
            }
        })
        .collect()
}

pub fn render_alliance_requests(ctx: &RenderContext<'_>) -> Vec<AllianceRequestCard> {
    ctx.snapshot
        .pending_alliance_requests()
        .iter()
        .map(|request| AllianceRequestCard {
            id: request.id,
            proposer: request
                .proposer_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| request.proposer_empire_id.to_string()),
            accept: ActionCommand::AcceptAlliance(request.id),
            decline: ActionCommand::DeclineAlliance(request.id),
        })
        .collect()
}
