use crate::config::Config;
use crate::device_camera::interface::{CameraError, CaptureFrame, DeviceCameraEvent, Facing};
use crate::device_input::interface::Key;
use crate::image_classifier::interface::{ClassifyError, ScanOutcome};
use std::time::Instant;

pub type RequestId = u64;

/// The whole application state. The request counter lives beside the
/// screen so it survives leaving and re-entering the scan view; a reply
/// from an abandoned session can never collide with a fresh request.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub screen: Screen,
    pub next_request: RequestId,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Home,
    Scan(ScanScreen),
    Results(ResultsScreen),
    Exited,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScanScreen {
    pub facing: Facing,
    pub camera: CameraStatus,
    pub flight: Flight,
}

impl ScanScreen {
    pub fn starting(facing: Facing) -> Self {
        Self {
            facing,
            camera: CameraStatus::Starting,
            flight: Flight::Idle,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CameraStatus {
    Starting,
    Ready,
    Failed { message: String },
}

/// The submission side of the scan screen. At most one request is ever
/// in flight.
#[derive(Clone, Debug, PartialEq)]
pub enum Flight {
    Idle,
    Submitting {
        request: RequestId,
        phase: SubmitPhase,
        started_at: Instant,
    },
    Failed {
        message: String,
        failed_at: Instant,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitPhase {
    Capturing,
    AwaitingReply,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsScreen {
    pub outcome: ScanOutcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    #[allow(dead_code)]
    Scan,
    #[allow(dead_code)]
    Results,
}

#[derive(Debug)]
pub enum Event {
    Tick(Instant),
    Pressed(Key),
    CameraEvent(DeviceCameraEvent),
    CameraStartDone(Result<(), CameraError>),
    FrameCaptureDone {
        request: RequestId,
        result: Result<CaptureFrame, CameraError>,
    },
    FrameClassifyDone {
        request: RequestId,
        result: Result<ScanOutcome, ClassifyError>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeToInputEvents,
    SubscribeToCameraEvents,
    SubscribeTick,
    StartCamera { facing: Facing },
    RestartCamera { facing: Facing },
    StopCamera,
    CaptureFrame { request: RequestId },
    ClassifyFrame { request: RequestId, frame: CaptureFrame },
}

pub fn init(config: &Config) -> (Model, Vec<Effect>) {
    init_at(config, Route::Home)
}

/// Boot routing. Results cannot be the first screen: no outcome exists at
/// boot, so that route lands on Home instead.
pub fn init_at(config: &Config, route: Route) -> (Model, Vec<Effect>) {
    let subscriptions = vec![
        Effect::SubscribeToInputEvents,
        Effect::SubscribeToCameraEvents,
        Effect::SubscribeTick,
    ];
    match route {
        Route::Home => (
            Model {
                screen: Screen::Home,
                next_request: 1,
            },
            subscriptions,
        ),
        Route::Scan => {
            let facing = config.default_facing;
            let mut effects = subscriptions;
            effects.push(Effect::StartCamera { facing });
            (
                Model {
                    screen: Screen::Scan(ScanScreen::starting(facing)),
                    next_request: 1,
                },
                effects,
            )
        }
        Route::Results => (
            Model {
                screen: Screen::Home,
                next_request: 1,
            },
            subscriptions,
        ),
    }
}

pub fn transition(config: &Config, model: Model, event: Event) -> (Model, Vec<Effect>) {
    match (model.screen.clone(), event) {
        // Home
        (Screen::Home, Event::Pressed(Key::Char('s') | Key::Enter)) => {
            let facing = config.default_facing;
            (
                Model {
                    screen: Screen::Scan(ScanScreen::starting(facing)),
                    ..model
                },
                vec![Effect::StartCamera { facing }],
            )
        }

        // Scan: camera lifecycle
        (Screen::Scan(scan), Event::CameraStartDone(Ok(()))) => (
            Model {
                screen: Screen::Scan(ScanScreen {
                    camera: CameraStatus::Ready,
                    ..scan
                }),
                ..model
            },
            vec![],
        ),
        (Screen::Scan(scan), Event::CameraStartDone(Err(e))) => (
            Model {
                screen: Screen::Scan(ScanScreen {
                    camera: CameraStatus::Failed {
                        message: e.user_message(),
                    },
                    ..scan
                }),
                ..model
            },
            vec![],
        ),
        (Screen::Scan(scan), Event::CameraEvent(DeviceCameraEvent::Disconnected)) => (
            Model {
                screen: Screen::Scan(ScanScreen {
                    camera: CameraStatus::Failed {
                        message: "The camera disconnected.".to_string(),
                    },
                    ..scan
                }),
                ..model
            },
            vec![],
        ),
        (Screen::Scan(scan), Event::Pressed(Key::Char('r'))) => match scan.camera.clone() {
            CameraStatus::Failed { .. } => {
                let facing = scan.facing;
                (
                    Model {
                        screen: Screen::Scan(ScanScreen {
                            camera: CameraStatus::Starting,
                            ..scan
                        }),
                        ..model
                    },
                    vec![Effect::StartCamera { facing }],
                )
            }
            _ => (model, vec![]),
        },
        (Screen::Scan(scan), Event::Pressed(Key::Char('t'))) => {
            // The flight is kept: a frame already captured rides out the
            // facing switch.
            let facing = scan.facing.toggled();
            (
                Model {
                    screen: Screen::Scan(ScanScreen {
                        facing,
                        camera: CameraStatus::Starting,
                        flight: scan.flight,
                    }),
                    ..model
                },
                vec![Effect::RestartCamera { facing }],
            )
        }

        // Scan: capture and submission
        (Screen::Scan(scan), Event::Pressed(Key::Char(' ') | Key::Enter)) => {
            match (scan.camera.clone(), scan.flight.clone()) {
                (CameraStatus::Ready, Flight::Idle)
                | (CameraStatus::Ready, Flight::Failed { .. }) => {
                    let request = model.next_request;
                    (
                        Model {
                            screen: Screen::Scan(ScanScreen {
                                flight: Flight::Submitting {
                                    request,
                                    phase: SubmitPhase::Capturing,
                                    started_at: Instant::now(),
                                },
                                ..scan
                            }),
                            next_request: request + 1,
                        },
                        vec![Effect::CaptureFrame { request }],
                    )
                }
                // Camera not ready, or a request already in flight: the
                // trigger is disabled, not an error
                _ => (model, vec![]),
            }
        }
        (Screen::Scan(scan), Event::FrameCaptureDone { request, result }) => {
            match scan.flight.clone() {
                Flight::Submitting {
                    request: current,
                    phase: SubmitPhase::Capturing,
                    started_at,
                } if current == request => match result {
                    Ok(frame) => (
                        Model {
                            screen: Screen::Scan(ScanScreen {
                                flight: Flight::Submitting {
                                    request,
                                    phase: SubmitPhase::AwaitingReply,
                                    started_at,
                                },
                                ..scan
                            }),
                            ..model
                        },
                        vec![Effect::ClassifyFrame { request, frame }],
                    ),
                    Err(e) => (
                        Model {
                            screen: Screen::Scan(ScanScreen {
                                flight: Flight::Failed {
                                    message: e.user_message(),
                                    failed_at: Instant::now(),
                                },
                                ..scan
                            }),
                            ..model
                        },
                        vec![],
                    ),
                },
                // Capture result for a request that is no longer current
                _ => (model, vec![]),
            }
        }
        (Screen::Scan(scan), Event::FrameClassifyDone { request, result }) => {
            match scan.flight.clone() {
                Flight::Submitting {
                    request: current, ..
                } if current == request => match result {
                    Ok(outcome) => (
                        Model {
                            screen: Screen::Results(ResultsScreen { outcome }),
                            ..model
                        },
                        vec![Effect::StopCamera],
                    ),
                    Err(e) => (
                        Model {
                            screen: Screen::Scan(ScanScreen {
                                flight: Flight::Failed {
                                    message: e.user_message(),
                                    failed_at: Instant::now(),
                                },
                                ..scan
                            }),
                            ..model
                        },
                        vec![],
                    ),
                },
                // Stale response from a superseded request
                _ => (model, vec![]),
            }
        }
        (Screen::Scan(scan), Event::Tick(now)) => match scan.flight.clone() {
            Flight::Failed { failed_at, .. }
                if now.duration_since(failed_at) >= config.toast_duration =>
            {
                (
                    Model {
                        screen: Screen::Scan(ScanScreen {
                            flight: Flight::Idle,
                            ..scan
                        }),
                        ..model
                    },
                    vec![],
                )
            }
            _ => (model, vec![]),
        },

        // Scan: leaving releases the camera; an in-flight reply that lands
        // afterwards finds no submitting flight and is dropped
        (Screen::Scan(_), Event::Pressed(Key::Esc | Key::Char('b'))) => (
            Model {
                screen: Screen::Home,
                ..model
            },
            vec![Effect::StopCamera],
        ),

        // Results
        (Screen::Results(_), Event::Pressed(Key::Char('s') | Key::Enter)) => {
            let facing = config.default_facing;
            (
                Model {
                    screen: Screen::Scan(ScanScreen::starting(facing)),
                    ..model
                },
                vec![Effect::StartCamera { facing }],
            )
        }
        (Screen::Results(_), Event::Pressed(Key::Esc | Key::Char('b') | Key::Char('h'))) => (
            Model {
                screen: Screen::Home,
                ..model
            },
            vec![],
        ),

        // Quitting from anywhere releases the camera
        (_, Event::Pressed(Key::Char('q') | Key::CtrlC)) => (
            Model {
                screen: Screen::Exited,
                ..model
            },
            vec![Effect::StopCamera],
        ),

        // Default case
        _ => (model, vec![]),
    }
}
