//! Integration tests for navigation target selection

use super::test_utils::{framed, StubDocument};
use bctx::{
    BrowsingContext, Configuration, ContextError, Sandbox, SandboxFlag, Settings,
};
use std::rc::Rc;

fn family(settings: Settings) -> Rc<BrowsingContext> {
    BrowsingContext::with_settings(Configuration::new(), Sandbox::NONE, settings)
}

#[test]
fn test_named_target_prefers_existing_frame() {
    let root = family(Settings::default());
    let document = StubDocument::host(&root);
    let results = framed(&root, &document, "results");
    let search = framed(&root, &document, "search");

    let chosen = search.choose_target("results").unwrap();
    assert!(Rc::ptr_eq(&chosen, &results));
    assert_eq!(root.group().len(), 0);
}

#[test]
fn test_opened_auxiliary_is_reusable_from_family() {
    let root = family(Settings::default());
    let document = StubDocument::host(&root);
    let frame = framed(&root, &document, "content");

    let opened = frame.choose_target("report").unwrap();
    assert!(Rc::ptr_eq(&opened.parent().unwrap(), &frame));
    assert!(root.group().contains(&opened));

    let window = opened.current_window().unwrap();
    assert!(Rc::ptr_eq(&window.browsing_context().unwrap(), &opened));

    // A sibling frame reaches it by ascending to the root and entering
    // `content`'s named table.
    let sibling = framed(&root, &document, "sidebar");
    assert!(Rc::ptr_eq(&sibling.choose_target("report").unwrap(), &opened));
}

#[test]
fn test_default_sandbox_applies_to_auxiliary_contexts() {
    let settings = Settings {
        default_sandbox: Sandbox::from(SandboxFlag::Plugins) | SandboxFlag::Modals,
        group_fallback: true,
    };
    let root = family(settings);
    let frame = root.create_child(Sandbox::NONE, true);

    let popup = frame.choose_target("_blank").unwrap();
    assert!(popup.security().contains(SandboxFlag::Plugins));
    assert!(popup.security().contains(SandboxFlag::Modals));
    assert!(!frame.security().contains(SandboxFlag::Plugins));
}

#[test]
fn test_blocked_named_target_reports_context() {
    let root = family(Settings::default());
    let frame = root.create_child(
        Sandbox::from(SandboxFlag::AuxiliaryNavigation) | SandboxFlag::Scripts,
        true,
    );

    match frame.choose_target("elsewhere") {
        Err(ContextError::NavigationBlocked {
            context,
            target,
            flag,
        }) => {
            assert_eq!(context, frame.id());
            assert_eq!(target, "elsewhere");
            assert_eq!(flag, SandboxFlag::AuxiliaryNavigation);
        }
        other => panic!("expected NavigationBlocked, got {:?}", other),
    }
    assert!(root.group().is_empty());
    assert!(frame.child_names().is_empty());
}

#[test]
fn test_blocked_frame_can_still_target_existing_names() {
    let root = family(Settings::default());
    let popup = root.create_named_child("popup", Sandbox::NONE, false);
    let frame = root.create_child(SandboxFlag::AuxiliaryNavigation.into(), true);

    assert!(Rc::ptr_eq(&frame.choose_target("popup").unwrap(), &popup));
    assert!(Rc::ptr_eq(&frame.choose_target("_top").unwrap(), &root));
}

#[test]
fn test_group_fallback_disabled_opens_new_context() {
    let settings = Settings {
        default_sandbox: Sandbox::NONE,
        group_fallback: false,
    };
    let root = family(settings);
    let popup = root.create_named_child("", Sandbox::NONE, false);
    let hidden = popup.create_named_child("hidden", Sandbox::NONE, true);

    let frame = root.create_child(Sandbox::NONE, true);
    assert!(frame.find_child("hidden").is_none());

    let opened = frame.choose_target("hidden").unwrap();
    assert!(!Rc::ptr_eq(&opened, &hidden));
    assert_eq!(root.group().len(), 2);
}

#[test]
fn test_error_message_names_target() {
    let root = family(Settings::default());
    let frame = root.create_child(SandboxFlag::AuxiliaryNavigation.into(), true);

    let message = frame.choose_target("_blank").unwrap_err().to_string();
    assert!(message.contains("_blank"));
    assert!(message.contains("auxiliary-navigation"));
}
