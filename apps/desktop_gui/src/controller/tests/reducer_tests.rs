use super::*;
use match_core::{Board, ImageId, Phase, ScoreRules, TileId, PAIR_COUNT};
use rand::SeedableRng;

const DELAY: Duration = Duration::from_millis(1000);

fn controller() -> GameController {
    let layout: Vec<ImageId> = (0..PAIR_COUNT)
        .flat_map(|image| [ImageId(image), ImageId(image)])
        .collect();
    let session = Session::new(
        Board::from_layout(&layout).expect("layout"),
        ScoreRules::default(),
    );
    GameController::new(session, StdRng::seed_from_u64(17), DELAY)
}

fn click(controller: &mut GameController, tile: usize, now: Instant) {
    controller.handle(UiEvent::TileClicked(TileId(tile)), now);
}

#[test]
fn starts_with_score_line() {
    let controller = controller();

    assert_eq!(controller.status(), "Score: 100");
    assert_eq!(controller.next_deadline(), None);
    assert_eq!(controller.reveal_delay(), DELAY);
}

#[test]
fn second_click_schedules_resolution_after_delay() {
    let mut controller = controller();
    let start = Instant::now();

    click(&mut controller, 0, start);
    assert_eq!(controller.next_deadline(), None);

    click(&mut controller, 1, start);
    assert_eq!(controller.next_deadline(), Some(start + DELAY));
    assert!(!controller.session().accepts_input());

    controller.tick(start + DELAY - Duration::from_millis(1));
    assert!(!controller.session().accepts_input());
    assert!(controller.session().tile(TileId(1)).expect("tile").is_revealed());

    controller.tick(start + DELAY);
    assert!(controller.session().accepts_input());
    assert!(controller.session().tile(TileId(1)).expect("tile").is_matched());
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn clicks_during_reveal_window_are_ignored() {
    let mut controller = controller();
    let start = Instant::now();
    click(&mut controller, 0, start);
    click(&mut controller, 2, start);

    click(&mut controller, 4, start + Duration::from_millis(10));

    assert_eq!(controller.session().clicks(), 2);
    assert!(!controller.session().tile(TileId(4)).expect("tile").is_revealed());
}

#[test]
fn clearing_the_board_shows_summary_only_after_delay() {
    let mut controller = controller();
    let mut now = Instant::now();

    for pair in 0..PAIR_COUNT {
        click(&mut controller, pair * 2, now);
        click(&mut controller, pair * 2 + 1, now);
        if pair == PAIR_COUNT - 1 {
            assert_eq!(controller.status(), "Score: 100");
        }
        now += DELAY;
        controller.tick(now);
    }

    assert_eq!(controller.session().phase(), Phase::Finished);
    assert_eq!(
        controller.status(),
        "Game over!\nScore: 100\nNumber of tries: 8"
    );
}

#[test]
fn score_line_updates_when_penalty_applies() {
    let mut controller = controller();
    let mut now = Instant::now();

    for _ in 0..14 {
        click(&mut controller, 0, now);
        click(&mut controller, 2, now);
        now += DELAY;
        controller.tick(now);
    }

    assert_eq!(controller.status(), "Score: 90");
}

#[test]
fn restart_drops_pending_resolution() {
    let mut controller = controller();
    let start = Instant::now();
    click(&mut controller, 0, start);
    click(&mut controller, 1, start);

    controller.handle(UiEvent::Restart, start + Duration::from_millis(200));
    click(&mut controller, 5, start + Duration::from_millis(300));
    controller.tick(start + DELAY);

    let session = controller.session();
    assert_eq!(session.epoch(), 1);
    assert_eq!(session.remaining_tiles(), 16);
    assert_eq!(session.phase(), Phase::FirstRevealed { first: TileId(5) });
    assert!(session.tiles().iter().all(|tile| !tile.is_matched()));
    assert_eq!(controller.status(), "Score: 100");
}

#[test]
fn restart_after_game_over_restores_score_line() {
    let mut controller = controller();
    let mut now = Instant::now();
    for pair in 0..PAIR_COUNT {
        click(&mut controller, pair * 2, now);
        click(&mut controller, pair * 2 + 1, now);
        now += DELAY;
        controller.tick(now);
    }

    controller.handle(UiEvent::Restart, now);

    assert_eq!(controller.status(), "Score: 100");
    assert_eq!(controller.session().turns(), 0);
    assert!(controller.session().accepts_input());
}
