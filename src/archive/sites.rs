// src/archive/sites.rs
//! Resolves a network account into the sites it has profiles on.

use crate::api::pagination::fetch_all;
use crate::api::responses::{NetworkUser, ToDomain};
use crate::api::{ApiTransport, BackoffGovernor, FieldSet, FilterSet, ResourceQuery};
use crate::error::AppError;
use crate::model::SiteIdentity;
use crate::types::AccountId;

/// Lists every main and meta site of `account`, with the user's id on each.
///
/// Meta sites are separate sites with their own user ids. An account without
/// any site yields [`AppError::NoAssociatedSites`], which callers treat as a
/// notice rather than a failure.
pub async fn enumerate_sites(
    transport: &dyn ApiTransport,
    filters: &FilterSet,
    account: AccountId,
    page_size: u32,
    governor: &mut BackoffGovernor<'_>,
) -> Result<Vec<SiteIdentity>, AppError> {
    let query = ResourceQuery::associated_sites(account, filters.token(FieldSet::Sites))
        .with_page_size(page_size);
    let batch = fetch_all::<NetworkUser>(transport, query, governor).await?;
    governor.settle().await;

    let sites = batch
        .items
        .into_iter()
        .map(|user| {
            log::debug!(
                "Account {} is user {} on {} ({})",
                account,
                user.user_id,
                user.site_url,
                user.site_name.as_deref().unwrap_or("unnamed site")
            );
            user.to_domain()
        })
        .collect::<Result<Vec<SiteIdentity>, AppError>>()?;

    if sites.is_empty() {
        return Err(AppError::NoAssociatedSites {
            account_id: account,
        });
    }

    log::info!("Account {} has {} associated site(s)", account, sites.len());
    Ok(sites)
}
