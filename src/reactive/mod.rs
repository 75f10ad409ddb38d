pub mod invalidation;

pub use invalidation::{
    request_frame, take_frame_request, with_app_state, with_app_state_mut, ChangeFlags, WidgetId,
};
