use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl SpinnerSize {
    fn classes(self) -> &'static str {
        match self {
            SpinnerSize::Sm => "h-4 w-4 border-2",
            SpinnerSize::Md => "h-8 w-8 border-4",
            SpinnerSize::Lg => "h-12 w-12 border-4",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingSpinnerProps {
    #[prop_or_default]
    pub size: SpinnerSize,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &LoadingSpinnerProps) -> Html {
    html! {
        <div
            class={classes!(
                "inline-block",
                "animate-spin",
                "rounded-full",
                "border-yellow-200",
                "border-t-white",
                props.size.classes()
            )}
            role="status"
            aria-live="polite"
            aria-label="Yükleniyor"
        ></div>
    }
}
