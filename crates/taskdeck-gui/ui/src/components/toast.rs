use yew::{Callback, Html, Properties, function_component, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub kind: ToastKind,
    pub message: String,
}

impl ToastMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub toast: ToastMessage,
    pub on_dismiss: Callback<()>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let class = match props.toast.kind {
        ToastKind::Success => "toast success",
        ToastKind::Error => "toast error",
    };
    let on_dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_dismiss.emit(()))
    };
    html! {
        <div class={class} onclick={on_dismiss}>
            { props.toast.message.clone() }
        </div>
    }
}
