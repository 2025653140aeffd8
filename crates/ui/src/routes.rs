use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use services::Screen;

use crate::context::AppContext;
use crate::views::{AuthView, DashboardView, ExerciseView, LevelsView, StudyView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", AuthView)] Auth {},
    #[layout(Layout)]
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/levels", LevelsView)] Levels {},
        #[route("/study/:level", StudyView)] Study { level: String },
        #[route("/exercise/:level", ExerciseView)] Exercise { level: String },
}

impl From<Screen> for Route {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Auth => Route::Auth {},
            Screen::Dashboard => Route::Dashboard {},
            Screen::Levels => Route::Levels {},
            Screen::Study(level) => Route::Study {
                level: level.to_string(),
            },
            Screen::Exercise(level) => Route::Exercise {
                level: level.to_string(),
            },
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let mut signing_out = use_signal(|| false);

    let session = use_resource({
        let progress = progress.clone();
        move || {
            let progress = progress.clone();
            async move { progress.current_session().await.ok().flatten() }
        }
    });
    let greeting = session
        .read()
        .as_ref()
        .and_then(|session| session.as_ref())
        .map(|session| session.user.name.clone());

    rsx! {
        nav { class: "topbar",
            h1 { class: "topbar-title", "{ctx.app_name()}" }
            ul { class: "topbar-links",
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Levels {}, "Levels" } }
            }
            div { class: "topbar-user",
                if let Some(name) = greeting {
                    span { class: "topbar-name", "{name}" }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: signing_out(),
                    onclick: move |_| {
                        let progress = progress.clone();
                        signing_out.set(true);
                        spawn(async move {
                            if let Err(err) = progress.sign_out().await {
                                tracing::warn!(error = %err, "sign out failed");
                            }
                            signing_out.set(false);
                            let _ = navigator.replace(Route::Auth {});
                        });
                    },
                    "Sign Out"
                }
            }
        }
    }
}
