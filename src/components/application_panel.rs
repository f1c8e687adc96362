//! Application Review Panel
//!
//! Creator-only list of join applications with status tabs, counts and
//! approve/reject actions. After an action the panel waits briefly, then
//! re-fetches applications and asks the parent to re-fetch the group.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, Decision};
use crate::config::REFRESH_DELAY_MS;
use crate::format::{format_timestamp, initial, resolve_image_url};
use crate::models::GroupApplication;
use crate::notice::notify;
use crate::status::{is_pending, ApplicationBuckets, ApplicationFilter};

#[component]
pub fn ApplicationPanel(
    group_id: i64,
    /// Called after a processed application has been re-fetched
    #[prop(into)]
    on_processed: Callback<()>,
) -> impl IntoView {
    let (applications, set_applications) = signal(Vec::<GroupApplication>::new());
    let (filter, set_filter) = signal(ApplicationFilter::default());
    let (selected, set_selected) = signal::<Option<GroupApplication>>(None);
    let (loading, set_loading) = signal(false);
    let (busy, set_busy) = signal(false);

    let buckets = Memo::new(move |_| applications.with(|apps| ApplicationBuckets::partition(apps)));

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::list_applications(group_id).await {
                Ok(loaded) => {
                    log::debug!("[REVIEW] {} applications for group {}", loaded.len(), group_id);
                    set_applications.set(loaded);
                }
                Err(e) => notify(&e.notice("Loading applications")),
            }
            set_loading.set(false);
        });
    };
    load();

    let decide = move |application_id: i64, decision: Decision| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match api::process_application(group_id, application_id, decision).await {
                Ok(()) => {
                    set_selected.set(None);
                    TimeoutFuture::new(REFRESH_DELAY_MS).await;
                    load();
                    on_processed.run(());
                }
                Err(e) => notify(&e.notice(decision.label())),
            }
            set_busy.set(false);
        });
    };
    let on_decide = Callback::new(move |(id, decision): (i64, Decision)| decide(id, decision));

    view! {
        <section class="application-panel">
            <div class="panel-header">
                <h3>"Join applications"</h3>
                <button class="secondary-btn" disabled=move || loading.get() on:click=move |_| load()>
                    {move || if loading.get() { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>

            <div class="application-tabs">
                {ApplicationFilter::ALL.into_iter().map(|f| {
                    let class = move || {
                        let mut c = format!("application-tab {}", f.class());
                        if filter.get() == f {
                            c.push_str(" active");
                        }
                        c
                    };
                    view! {
                        <button class=class on:click=move |_| set_filter.set(f)>
                            <span class="tab-label">{f.label()}</span>
                            <span class="tab-count">{move || buckets.with(|b| b.count(f))}</span>
                        </button>
                    }
                }).collect_view()}
            </div>

            {move || {
                let f = filter.get();
                let list = buckets.with(|b| b.bucket(f).to_vec());
                if list.is_empty() {
                    view! { <p class="empty-state">{f.empty_message()}</p> }.into_any()
                } else {
                    view! {
                        <ul class="application-list">
                            {list.into_iter().map(|app| view! {
                                <ApplicationRow
                                    application=app
                                    busy=busy
                                    on_open=Callback::new(move |a: GroupApplication| set_selected.set(Some(a)))
                                    on_decide=on_decide
                                />
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }
            }}

            {move || selected.get().map(|app| view! {
                <ApplicantModal
                    application=app
                    busy=busy
                    on_decide=on_decide
                    on_close=Callback::new(move |_: ()| set_selected.set(None))
                />
            })}
        </section>
    }
}

fn avatar(name: &str, url: Option<&str>) -> impl IntoView {
    match url.filter(|u| !u.trim().is_empty()) {
        Some(u) => view! { <img class="avatar" src=resolve_image_url(u) alt=name.to_string() /> }.into_any(),
        None => view! { <span class="avatar avatar-fallback">{initial(name)}</span> }.into_any(),
    }
}

/// Approve / reject pair for a pending application
fn decision_buttons(application_id: i64, busy: ReadSignal<bool>, on_decide: Callback<(i64, Decision)>) -> impl IntoView {
    [Decision::Approve, Decision::Reject]
        .into_iter()
        .map(|d| {
            let class = match d {
                Decision::Approve => "approve-btn",
                Decision::Reject => "reject-btn",
            };
            view! {
                <button
                    class=class
                    disabled=move || busy.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_decide.run((application_id, d));
                    }
                >
                    {d.label()}
                </button>
            }
        })
        .collect_view()
}

#[component]
fn ApplicationRow(
    application: GroupApplication,
    busy: ReadSignal<bool>,
    #[prop(into)] on_open: Callback<GroupApplication>,
    #[prop(into)] on_decide: Callback<(i64, Decision)>,
) -> impl IntoView {
    let pending = is_pending(&application);
    let id = application.id;
    let applied = format_timestamp(application.apply_date);
    let name = application.applicant_name.clone();
    let message = application.message.clone();
    let pic = avatar(&name, application.avatar_url.as_deref());

    let mut class = String::from("application-row");
    if pending {
        class.push_str(" clickable");
    }

    view! {
        <li class=class on:click=move |_| if pending { on_open.run(application.clone()) }>
            {pic}
            <div class="application-info">
                <span class="applicant-name">{name}</span>
                <span class="apply-date">{applied}</span>
                <p class="application-message">{message}</p>
            </div>
            {pending.then(|| view! {
                <div class="application-actions">{decision_buttons(id, busy, on_decide)}</div>
            })}
        </li>
    }
}

/// Applicant detail with the same approve/reject actions
#[component]
pub fn ApplicantModal(
    application: GroupApplication,
    busy: ReadSignal<bool>,
    #[prop(into)] on_decide: Callback<(i64, Decision)>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let id = application.id;
    let pic = avatar(&application.applicant_name, application.avatar_url.as_deref());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal applicant-modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"Applicant"</h3>
                    <button class="modal-close" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <div class="applicant-profile">
                    {pic}
                    <span class="applicant-name">{application.applicant_name.clone()}</span>
                </div>
                <dl class="applicant-details">
                    <dt>"Applied"</dt>
                    <dd>{format_timestamp(application.apply_date)}</dd>
                    <dt>"Message"</dt>
                    <dd class="application-message">{application.message.clone()}</dd>
                </dl>
                <div class="modal-actions">{decision_buttons(id, busy, on_decide)}</div>
            </div>
        </div>
    }
}
