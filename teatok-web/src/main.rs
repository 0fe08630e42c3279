use gloo_storage::{LocalStorage, Storage};
use teatok_client::{HttpApi, Identity};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod ui;

const KEY_LOGIN: &str = "login";

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<Root>::new().render();
}

/// Everything needed to talk to the server as someone
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoginInfo {
    pub host: String,
    pub identity: Identity,
}

impl LoginInfo {
    pub fn api(&self) -> HttpApi {
        HttpApi::new(self.host.clone())
    }
}

enum RootMsg {
    UserLogin(LoginInfo),
    UserLogout,
}

struct Root {
    login: Option<LoginInfo>,
    last_host: Option<String>,
}

impl Component for Root {
    type Message = RootMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let login: Option<LoginInfo> = LocalStorage::get(KEY_LOGIN).ok();
        Root {
            last_host: login.as_ref().map(|l| l.host.clone()),
            login,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            RootMsg::UserLogin(login) => {
                if let Err(err) = LocalStorage::set(KEY_LOGIN, &login) {
                    tracing::error!(?err, "failed saving login info to local storage");
                }
                self.last_host = Some(login.host.clone());
                self.login = Some(login);
            }
            RootMsg::UserLogout => {
                LocalStorage::delete(KEY_LOGIN);
                if let Some(login) = self.login.take() {
                    spawn_local(async move {
                        if let Err(err) = login.api().logout(&login.identity.id).await {
                            tracing::error!(?err, "failed to log out");
                        }
                    });
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.login {
            None => html! {
                <div class="container">
                    <ui::Login
                        host={ self.last_host.clone() }
                        on_submit={ ctx.link().callback(RootMsg::UserLogin) }
                    />
                </div>
            },
            Some(login) => html! {
                <ui::App
                    login={ login.clone() }
                    on_logout={ ctx.link().callback(|_| RootMsg::UserLogout) }
                />
            },
        }
    }
}
