use super::*;

use crate::foundation::core::Point;
use crate::render::headless::HeadlessSurface;
use crate::render::monospace::MonospaceTypeset;
use crate::render::surface::{ShapeSpec, ShapeStyle};

/// Minimal command: one dot at the origin, end state reached in `do_init`.
struct DotCommand {
    state: CommandState,
    hooks: Vec<&'static str>,
}

impl DotCommand {
    fn new(options: CommandOptions) -> Self {
        Self {
            state: CommandState::with_options(options),
            hooks: Vec::new(),
        }
    }
}

impl Command for DotCommand {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn pre_init(&mut self, _ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        self.hooks.push("pre_init");
        Ok(())
    }

    fn do_init(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        self.hooks.push("do_init");
        let id = ctx
            .surface
            .draw(ShapeSpec::Dot { at: Point::ZERO }, ShapeStyle::default());
        self.state.result.push(id);
        self.state.label_anchor = Some(Point::ZERO);
        Ok(())
    }

    fn post_init(&mut self, _ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        self.hooks.push("post_init");
        Ok(())
    }
}

struct Rig {
    session: DocumentSession,
    surface: HeadlessSurface,
    annotations: HeadlessSurface,
    engine: MonospaceTypeset,
    queue: TweenQueue,
}

impl Rig {
    fn new() -> Self {
        Self {
            session: DocumentSession::new(),
            surface: HeadlessSurface::new(),
            annotations: HeadlessSurface::new(),
            engine: MonospaceTypeset::default(),
            queue: TweenQueue::new(),
        }
    }

    fn ctx(&mut self) -> CommandContext<'_> {
        CommandContext {
            session: &mut self.session,
            surface: &mut self.surface,
            engine: &mut self.engine,
            queue: &mut self.queue,
            annotations: Some(&mut self.annotations),
        }
    }
}

#[test]
fn init_runs_hooks_in_order_and_flips_the_flag() {
    let mut rig = Rig::new();
    let mut cmd = DotCommand::new(CommandOptions::default());
    assert!(!cmd.state().initialized);
    cmd.init(&mut rig.ctx()).unwrap();
    assert_eq!(cmd.hooks, ["pre_init", "do_init", "post_init"]);
    assert!(cmd.state().initialized);
    assert!(cmd.state().has_result());
}

#[test]
fn double_init_is_an_error() {
    let mut rig = Rig::new();
    let mut cmd = DotCommand::new(CommandOptions::default());
    cmd.init(&mut rig.ctx()).unwrap();
    let err = cmd.init(&mut rig.ctx()).unwrap_err().to_string();
    assert!(err.contains("initialized"), "{err}");
}

#[test]
fn play_before_init_fails() {
    let mut rig = Rig::new();
    let mut cmd = DotCommand::new(CommandOptions::default());
    let err = cmd.play(&mut rig.ctx()).unwrap_err().to_string();
    assert!(err.contains("before init"), "{err}");
}

#[test]
fn direct_play_auto_initializes() {
    let mut rig = Rig::new();
    let mut cmd = DotCommand::new(CommandOptions::default());
    cmd.direct_play(&mut rig.ctx()).unwrap();
    assert!(cmd.state().initialized);
    assert_eq!(rig.surface.visible().len(), 1);
}

#[test]
fn labels_show_once_after_playback() {
    let mut rig = Rig::new();
    let options = CommandOptions {
        label: Some("v".to_string()),
        label_offset: Vec2::new(0.0, -2.0),
        ..CommandOptions::default()
    };
    let mut cmd = DotCommand::new(options);
    cmd.init(&mut rig.ctx()).unwrap();
    cmd.play(&mut rig.ctx()).unwrap();
    assert_eq!(rig.annotations.visible().len(), 1);
    match &rig.annotations.visible()[0].spec {
        ShapeSpec::Label { text, at } => {
            assert_eq!(text, "v");
            assert_eq!(*at, Point::new(0.0, -2.0));
        }
        other => panic!("unexpected spec: {other:?}"),
    }
    // Replaying does not duplicate the label.
    cmd.play(&mut rig.ctx()).unwrap();
    assert_eq!(rig.annotations.visible().len(), 1);
}

#[test]
fn suppressed_or_empty_labels_never_show() {
    let mut rig = Rig::new();
    let mut silent = DotCommand::new(CommandOptions {
        label: Some("v".to_string()),
        show_label: false,
        ..CommandOptions::default()
    });
    silent.init(&mut rig.ctx()).unwrap();
    silent.play(&mut rig.ctx()).unwrap();

    let mut unnamed = DotCommand::new(CommandOptions {
        label: Some(String::new()),
        ..CommandOptions::default()
    });
    unnamed.init(&mut rig.ctx()).unwrap();
    unnamed.play(&mut rig.ctx()).unwrap();

    assert!(rig.annotations.visible().is_empty());
}

#[test]
fn clear_returns_to_the_pre_init_state() {
    let mut rig = Rig::new();
    let mut cmd = DotCommand::new(CommandOptions {
        label: Some("v".to_string()),
        ..CommandOptions::default()
    });
    cmd.init(&mut rig.ctx()).unwrap();
    cmd.play(&mut rig.ctx()).unwrap();
    assert_eq!(rig.surface.visible().len(), 1);
    assert_eq!(rig.annotations.visible().len(), 1);

    cmd.clear(&mut rig.ctx());
    assert!(!cmd.state().initialized);
    assert!(!cmd.state().has_result());
    assert!(rig.surface.visible().is_empty());
    assert!(rig.annotations.visible().is_empty());

    // The cleared command can be staged again.
    cmd.init(&mut rig.ctx()).unwrap();
    assert_eq!(rig.surface.visible().len(), 1);
}

#[test]
fn options_parse_from_json() {
    let options = CommandOptions::from_json(serde_json::json!({
        "color": "teal",
        "label": "a",
        "show_label": false,
        "params": { "row": 1 }
    }))
    .unwrap();
    assert_eq!(options.color.as_deref(), Some("teal"));
    assert!(!options.show_label);
    assert_eq!(options.params["row"], 1);
    assert!(CommandOptions::from_json(serde_json::json!({ "color": 3 })).is_err());
}
