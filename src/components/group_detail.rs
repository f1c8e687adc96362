//! Group Detail Component
//!
//! One group with its members, the caller's membership actions, the group
//! itinerary and, for the creator, the application review panel.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ApplicationPanel, ApplyForm, ConfirmButton, StatusBadge};
use crate::context::{use_app_context, Screen};
use crate::format::{format_budget, format_date, initial, itinerary_href, resolve_image_url};
use crate::membership::{standing, Standing};
use crate::models::{GroupItinerary, TravelGroup, UserGroupStatus};
use crate::notice::notify;
use crate::status::{can_close_group, can_create_itinerary, shows_join_actions, CLOSED_STATUS};

#[component]
pub fn GroupDetail(group_id: i64) -> impl IntoView {
    let ctx = use_app_context();

    let (group, set_group) = signal::<Option<TravelGroup>>(None);
    let (membership, set_membership) = signal(UserGroupStatus::default());
    let (itinerary, set_itinerary) = signal::<Option<GroupItinerary>>(None);
    let (load_error, set_load_error) = signal::<Option<String>>(None);
    let (show_apply, set_show_apply) = signal(false);
    let (working, set_working) = signal(false);

    let load = move || {
        spawn_local(async move {
            match api::get_group(group_id).await {
                Ok(g) => set_group.set(Some(g)),
                Err(e) => {
                    set_load_error.set(Some(e.notice("Loading group")));
                    return;
                }
            }
            match api::user_group_status(group_id).await {
                Ok(s) => set_membership.set(s),
                Err(e) => log::warn!("[DETAIL] membership status unavailable: {}", e),
            }
            match api::get_group_itinerary(group_id).await {
                Ok(it) => set_itinerary.set(it),
                Err(e) => log::warn!("[DETAIL] itinerary unavailable: {}", e),
            }
        });
    };
    load();

    let current_standing = Memo::new(move |_| {
        group.with(|g| g.as_ref().map(|g| standing(g, ctx.current_user.get(), membership.get())))
    });
    // Gates the review panel; a group refresh that keeps the creator keeps the panel mounted.
    let is_creator = Memo::new(move |_| current_standing.get() == Some(Standing::Creator));
    let closable = Memo::new(move |_| group.with(|g| g.as_ref().is_some_and(can_close_group)));

    let create_itinerary = move |_| {
        let Some(g) = group.get_untracked() else { return };
        set_working.set(true);
        spawn_local(async move {
            match api::create_group_itinerary(&g).await {
                Ok(it) => {
                    log::info!("[DETAIL] itinerary {} created for group {}", it.id, group_id);
                    set_itinerary.set(Some(it));
                }
                Err(e) => notify(&e.notice("Create itinerary")),
            }
            set_working.set(false);
        });
    };

    let close_group = Callback::new(move |_: ()| {
        spawn_local(async move {
            match api::update_group_status(group_id, CLOSED_STATUS).await {
                Ok(updated) => set_group.set(Some(updated)),
                Err(e) => notify(&e.notice("Close group")),
            }
        });
    });

    let withdraw = Callback::new(move |_: ()| {
        spawn_local(async move {
            match api::withdraw_application(group_id).await {
                Ok(()) => {
                    notify("Application withdrawn.");
                    load();
                }
                Err(e) => notify(&e.notice("Withdraw")),
            }
        });
    });

    let leave = Callback::new(move |_: ()| {
        spawn_local(async move {
            match api::leave_group(group_id).await {
                Ok(()) => {
                    notify("You left the group.");
                    ctx.reload();
                    ctx.navigate(Screen::Browser);
                }
                Err(e) => notify(&e.notice("Leave group")),
            }
        });
    });

    view! {
        <div class="group-detail">
            <button class="back-btn" on:click=move |_| ctx.navigate(Screen::Browser)>"← Back to groups"</button>

            <Show when=move || load_error.get().is_some()>
                <p class="load-error">{move || load_error.get().unwrap_or_default()}</p>
            </Show>

            {move || group.get().map(|g| {
                let creator = is_creator.get();
                let cover = resolve_image_url(
                    g.destination.as_ref().and_then(|d| d.image_url.as_deref()).unwrap_or(""),
                );
                let members = g.members.clone();
                let tags = g.travel_tags.clone();
                let title = g.title.clone();
                let show_actions = shows_join_actions(&g);
                let itinerary_ready = can_create_itinerary(&g);
                view! {
                    <header class="detail-header">
                        <img class="detail-cover" src=cover alt=g.destination_name().to_string() />
                        <div class="detail-title">
                            <h1>{g.title.clone()}</h1>
                            <StatusBadge
                                status=g.status.clone()
                                current_members=g.current_members
                                max_members=g.max_members
                            />
                        </div>
                        <p class="detail-destination">{g.destination_name().to_string()}</p>
                    </header>

                    <section class="detail-facts">
                        <dl>
                            <dt>"Dates"</dt>
                            <dd>{format!("{} → {}", format_date(g.start_date), format_date(g.end_date))}</dd>
                            <dt>"Members"</dt>
                            <dd>{format!("{}/{}", g.current_members, g.max_members)}</dd>
                            <dt>"Budget"</dt>
                            <dd>{format_budget(g.estimated_budget)}</dd>
                            <dt>"Type"</dt>
                            <dd>{g.group_type.clone().unwrap_or_default()}</dd>
                        </dl>
                        <p class="detail-description">{g.description.clone().unwrap_or_default()}</p>
                        <div class="group-card-tags">
                            {tags.into_iter().map(|t| view! { <span class="tag-chip">{t}</span> }).collect_view()}
                        </div>
                    </section>

                    <section class="detail-members">
                        <h3>"Members"</h3>
                        <ul>
                            {members.into_iter().map(|m| {
                                let pic = match m.avatar_url.as_deref().filter(|u| !u.is_empty()) {
                                    Some(u) => view! { <img class="avatar" src=resolve_image_url(u) /> }.into_any(),
                                    None => view! { <span class="avatar avatar-fallback">{initial(&m.username)}</span> }.into_any(),
                                };
                                view! {
                                    <li class="member">
                                        {pic}
                                        <span>{m.username.clone()}</span>
                                        {m.role.clone().map(|r| view! { <span class="member-role">{r}</span> })}
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </section>

                    <section class="detail-itinerary">
                        <h3>"Group itinerary"</h3>
                        {move || match itinerary.get() {
                            Some(it) => view! {
                                <a class="primary-btn" href=itinerary_href(it.id, group_id)>
                                    {it.title.unwrap_or_else(|| "View itinerary".to_string())}
                                </a>
                            }.into_any(),
                            None if creator => view! {
                                <button
                                    class="primary-btn"
                                    disabled=move || !itinerary_ready || working.get()
                                    on:click=create_itinerary
                                >
                                    {move || if working.get() { "Creating..." } else { "Create group itinerary" }}
                                </button>
                                <Show when=move || !itinerary_ready>
                                    <p class="hint">"Available once the group is full"</p>
                                </Show>
                            }.into_any(),
                            None => view! {
                                <p class="hint">"The organizer has not created an itinerary yet"</p>
                            }.into_any(),
                        }}
                    </section>

                    {if !creator && show_actions {
                        view! {
                            <MembershipActions
                                standing=current_standing
                                on_apply=Callback::new(move |_: ()| set_show_apply.set(true))
                                on_withdraw=withdraw
                                on_leave=leave
                            />
                        }.into_any()
                    } else {
                        ().into_any()
                    }}

                    <Show when=move || show_apply.get()>
                        <ApplyForm
                            group_id=group_id
                            group_title=title.clone()
                            on_submitted=Callback::new(move |_: ()| {
                                set_show_apply.set(false);
                                load();
                            })
                            on_close=Callback::new(move |_: ()| set_show_apply.set(false))
                        />
                    </Show>
                }
            })}

            <Show when=move || is_creator.get()>
                <section class="creator-tools">
                    <Show when=move || closable.get()>
                        <ConfirmButton
                            label="Close group"
                            button_class="danger-btn"
                            prompt="Close this group?"
                            on_confirm=close_group
                        />
                    </Show>
                    <ApplicationPanel group_id=group_id on_processed=Callback::new(move |_: ()| load()) />
                </section>
            </Show>
        </div>
    }
}

/// Action block for a non-creator
#[component]
fn MembershipActions(
    standing: Memo<Option<Standing>>,
    #[prop(into)] on_apply: Callback<()>,
    #[prop(into)] on_withdraw: Callback<()>,
    #[prop(into)] on_leave: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="membership-actions">
            {move || match standing.get() {
                Some(Standing::Member) => view! {
                    <span class="member-note">"You are a member of this group"</span>
                    <ConfirmButton
                        label="Leave group"
                        button_class="danger-btn"
                        prompt="Leave this group?"
                        on_confirm=on_leave
                    />
                }.into_any(),
                Some(Standing::Pending) => view! {
                    <span class="pending-note">"Application in progress"</span>
                    <ConfirmButton
                        label="Withdraw application"
                        button_class="secondary-btn"
                        prompt="Withdraw your application?"
                        on_confirm=on_withdraw
                    />
                }.into_any(),
                Some(Standing::CanApply { free_slots }) => view! {
                    <button class="primary-btn" on:click=move |_| on_apply.run(())>
                        {format!("Apply to join ({} spots left)", free_slots)}
                    </button>
                }.into_any(),
                Some(Standing::Full) => view! { <span class="full-note">"Group full"</span> }.into_any(),
                Some(Standing::Creator) | None => ().into_any(),
            }}
        </div>
    }
}
