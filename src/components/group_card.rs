//! Group Card Component
//!
//! One travel group in a browser list. Clicking opens the detail page.

use leptos::prelude::*;

use crate::components::StatusBadge;
use crate::context::{use_app_context, Screen};
use crate::format::{format_budget, format_date_range, format_score, resolve_image_url, score_class};
use crate::membership::GroupRole;
use crate::models::TravelGroup;

#[component]
pub fn GroupCard(
    group: TravelGroup,
    #[prop(optional)] role: Option<GroupRole>,
    /// Show the compatibility score (recommendations tab)
    #[prop(optional)]
    show_score: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    let group_id = group.id;

    let cover = group
        .destination
        .as_ref()
        .and_then(|d| d.image_url.clone())
        .or_else(|| group.group_avatar_url.clone())
        .unwrap_or_default();
    let cover = resolve_image_url(&cover);
    let dates = format_date_range(group.start_date, group.end_date);
    let destination = group.destination_name().to_string();
    let description = group.description.clone().unwrap_or_default();
    let members = format!("{}/{} members", group.current_members, group.max_members);
    let budget = format_budget(group.estimated_budget);
    let group_type = group.group_type.clone().unwrap_or_default();
    let creator = group.creator.as_ref().map(|c| c.username.clone()).unwrap_or_default();
    let score = group.compatibility_score.filter(|_| show_score);
    let tags = group.travel_tags.clone();

    let status = group.status.clone();
    let current = group.current_members;
    let max = group.max_members;

    view! {
        <div class="group-card" on:click=move |_| ctx.navigate(Screen::Detail(group_id))>
            <div class="group-card-cover">
                <img src=cover alt=destination.clone() />
                <span class="group-card-dates">{dates}</span>
                {role.map(|r| {
                    let mut class = String::from("role-badge");
                    if r == GroupRole::Creator {
                        class.push_str(" creator");
                    }
                    view! { <span class=class>{r.label()}</span> }
                })}
            </div>
            <div class="group-card-body">
                <div class="group-card-header">
                    <h3 class="group-card-title">{group.title.clone()}</h3>
                    <StatusBadge status=status current_members=current max_members=max />
                </div>
                <p class="group-card-destination">{destination}</p>
                <p class="group-card-description">{description}</p>
                <div class="group-card-tags">
                    {tags.into_iter().map(|t| view! { <span class="tag-chip">{t}</span> }).collect_view()}
                </div>
                <div class="group-card-meta">
                    <span>{members}</span>
                    <span>{group_type}</span>
                    <span>{budget}</span>
                </div>
                <div class="group-card-footer">
                    <span class="group-card-creator">{creator}</span>
                    {score.map(|s| view! {
                        <span class=format!("compatibility {}", score_class(s))>
                            {format!("Match {}", format_score(s))}
                        </span>
                    })}
                </div>
            </div>
        </div>
    }
}
