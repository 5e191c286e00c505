use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use super::{
    direction::Direction,
    food::place_food,
    grid::{Grid, Point},
    snake_player::SnakePlayer,
    speed::{SpeedController, INITIAL_SPEED_MS, SPEED_FLOOR_MS, SPEED_STEP_MS},
    ticker::{TickHandle, TickScheduler},
};

/// Max board size.
pub const MAX_BOARD_SIZE: i32 = 40;
/// Min board size. Large enough to always contain [`ORIGIN`].
pub const MIN_BOARD_SIZE: i32 = 10;
/// Board size used when nothing else is configured.
pub const DEFAULT_BOARD_SIZE: i32 = 20;
/// Cell every round starts from.
pub const ORIGIN: Point = Point::new(10, 10);
/// Heading every round starts with.
pub const START_DIRECTION: Direction = Direction::Right;

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    InvalidBoardSize(i32),
    InvalidSpeed { initial: u64, floor: u64 },
    NoFreeCell,
}

impl std::fmt::Display for SnakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeError::InvalidBoardSize(size) => write!(
                f,
                "board size {size} is outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"
            ),
            SnakeError::InvalidSpeed { initial, floor } => write!(
                f,
                "speed floor {floor}ms must be positive and no slower than the initial {initial}ms"
            ),
            SnakeError::NoFreeCell => write!(f, "no free cell left for food"),
        }
    }
}

impl std::error::Error for SnakeError {}

/// Tunables of a game. Only validated params ever reach a [`SnakeGame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnakeParams {
    pub grid_size: i32,
    pub initial_speed_ms: u64,
    pub speed_floor_ms: u64,
    pub speed_step_ms: u64,
}

impl Default for SnakeParams {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_BOARD_SIZE,
            initial_speed_ms: INITIAL_SPEED_MS,
            speed_floor_ms: SPEED_FLOOR_MS,
            speed_step_ms: SPEED_STEP_MS,
        }
    }
}

impl SnakeParams {
    /// Checks the params and builds the board they describe.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] naming the first invalid value.
    pub fn validate(&self) -> Result<Grid> {
        let grid = Grid::new(self.grid_size)?;
        if self.speed_floor_ms == 0 || self.speed_floor_ms > self.initial_speed_ms {
            return Err(SnakeError::InvalidSpeed {
                initial: self.initial_speed_ms,
                floor: self.speed_floor_ms,
            });
        }
        Ok(grid)
    }

    fn speed(&self) -> SpeedController {
        SpeedController::new(
            self.initial_speed_ms,
            self.speed_floor_ms,
            self.speed_step_ms,
        )
    }
}

/// What a renderer draws in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeBlock {
    Empty,
    Food,
    Body,
    Head,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionKind),
    /// The snake covers the whole board and no food can be placed.
    BoardFull,
}

/// Terminal notification of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub score: usize,
    pub reason: EndReason,
}

/// Device independent commands a player can give.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeInput {
    Turn(Direction),
    Start,
    Acknowledge,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub new_head: Point,
    pub ate_food: bool,
    pub game_over: Option<GameOver>,
}

/// Wall check first, then the body.
#[must_use]
pub fn detect_collision(grid: &Grid, snake: &SnakePlayer) -> Option<CollisionKind> {
    if !grid.is_in_bounds(snake.get_head()) {
        Some(CollisionKind::Wall)
    } else if snake.head_hits_body() {
        Some(CollisionKind::SelfCollision)
    } else {
        None
    }
}

/// State of a single playthrough. Replaced as a whole on reset.
#[derive(Clone, Debug)]
struct Round {
    snake: SnakePlayer,
    food: Point,
    speed: SpeedController,
}

impl Round {
    fn new(params: &SnakeParams, grid: &Grid, rng: &mut StdRng) -> Result<Self> {
        let snake = SnakePlayer::new(ORIGIN, START_DIRECTION);
        let food = place_food(grid, &snake.occupied(), rng)?;
        Ok(Self {
            snake,
            food,
            speed: params.speed(),
        })
    }
}

/// Model of the Snake Game. Owns the round, the lifecycle and the tick handle.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    params: SnakeParams,
    grid: Grid,
    round: Round,
    state: SessionState,
    game_over: Option<GameOver>,
    ticker: TickScheduler,
    rng: StdRng,
}

impl SnakeGame {
    /// Creates an idle game with a fresh round.
    ///
    /// # Errors
    ///
    /// If `params` are invalid a [`SnakeError`] is returned.
    pub fn new(params: SnakeParams) -> Result<Self> {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Same as [`SnakeGame::new`] with reproducible food placement.
    ///
    /// # Errors
    ///
    /// If `params` are invalid a [`SnakeError`] is returned.
    pub fn with_seed(params: SnakeParams, seed: u64) -> Result<Self> {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: SnakeParams, mut rng: StdRng) -> Result<Self> {
        let grid = params.validate()?;
        let round = Round::new(&params, &grid, &mut rng)?;
        debug!("New SnakeGame params: {:#?}", params);
        Ok(Self {
            params,
            grid,
            round,
            state: SessionState::Idle,
            game_over: None,
            ticker: TickScheduler::new(),
            rng,
        })
    }

    /// Idle -> Running. Does nothing in any other state.
    ///
    /// # Errors
    ///
    /// Fails only if the initial food cannot be placed.
    pub fn start(&mut self) -> Result<bool> {
        if self.state != SessionState::Idle {
            debug!("Start ignored while {:?}", self.state);
            return Ok(false);
        }
        self.reset_round()?;
        self.state = SessionState::Running;
        self.ticker.start(self.round.speed.current());
        info!("Game started");
        Ok(true)
    }

    /// Queues a turn for the next tick. Reversals and turns outside a
    /// running round are ignored.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let accepted = self.round.snake.request_direction(direction);
        if !accepted {
            debug!(
                "Rejected turn {direction} while heading {}",
                self.round.snake.heading()
            );
        }
        accepted
    }

    /// Handles a tick from the timer stamped with `generation`. Ticks from a
    /// cancelled timer are dropped.
    pub fn on_timer(&mut self, generation: u64) -> Option<TickReport> {
        if !self.ticker.is_current(generation) {
            debug!("Dropped stale tick from timer {generation}");
            return None;
        }
        self.tick()
    }

    /// Runs one simulation step: advance, resolve food, detect collision.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.state != SessionState::Running {
            return None;
        }
        let new_head = self.round.snake.advance();
        let ate_food = new_head == self.round.food;

        if ate_food {
            match place_food(&self.grid, &self.round.snake.occupied(), &mut self.rng) {
                Ok(food) => self.round.food = food,
                Err(e) => {
                    info!("Board filled: {e}");
                    return Some(TickReport {
                        new_head,
                        ate_food,
                        game_over: Some(self.end(EndReason::BoardFull)),
                    });
                }
            }
            let before = self.round.speed.current();
            let after = self.round.speed.on_food_eaten();
            if after != before {
                self.ticker.start(after);
            }
        } else {
            self.round.snake.shed_tail();
        }

        let game_over = detect_collision(&self.grid, &self.round.snake)
            .map(|kind| self.end(EndReason::Collision(kind)));
        Some(TickReport {
            new_head,
            ate_food,
            game_over,
        })
    }

    /// Over -> Idle. The board is reset but no timer is armed.
    ///
    /// # Errors
    ///
    /// Fails only if the initial food cannot be placed.
    pub fn acknowledge(&mut self) -> Result<bool> {
        if self.state != SessionState::Over {
            return Ok(false);
        }
        self.reset_round()?;
        self.game_over = None;
        self.state = SessionState::Idle;
        debug!("Game over acknowledged");
        Ok(true)
    }

    /// Routes a player command to the matching transition.
    ///
    /// # Errors
    ///
    /// See [`SnakeGame::start`] and [`SnakeGame::acknowledge`].
    pub fn apply_input(&mut self, input: SnakeInput) -> Result<bool> {
        match input {
            SnakeInput::Turn(direction) => Ok(self.set_direction(direction)),
            SnakeInput::Start => self.start(),
            SnakeInput::Acknowledge => self.acknowledge(),
        }
    }

    fn end(&mut self, reason: EndReason) -> GameOver {
        self.ticker.cancel();
        let over = GameOver {
            score: self.score(),
            reason,
        };
        info!("Game over ({:?}). Final score: {}", reason, over.score);
        self.state = SessionState::Over;
        self.game_over = Some(over);
        over
    }

    fn reset_round(&mut self) -> Result<()> {
        self.ticker.cancel();
        self.round = Round::new(&self.params, &self.grid, &mut self.rng)?;
        Ok(())
    }

    /// Grid of blocks, `[row][column]`, for renderers. Cells off the board
    /// (a head that went through a wall) are left out.
    #[must_use]
    pub fn board(&self) -> Vec<Vec<SnakeBlock>> {
        let size = usize::try_from(self.grid.size()).unwrap_or(0);
        let mut board = vec![vec![SnakeBlock::Empty; size]; size];
        let mut put = |p: Point, block: SnakeBlock| {
            if !self.grid.is_in_bounds(p) {
                return;
            }
            if let (Ok(row), Ok(col)) = (usize::try_from(p.y - 1), usize::try_from(p.x - 1)) {
                board[row][col] = block;
            }
        };
        put(self.round.food, SnakeBlock::Food);
        for segment in self.round.snake.segments().skip(1) {
            put(*segment, SnakeBlock::Body);
        }
        put(self.round.snake.get_head(), SnakeBlock::Head);
        board
    }

    /// Segments minus the starting one.
    #[must_use]
    pub fn score(&self) -> usize {
        self.round.snake.len() - 1
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn get_game_over(&self) -> Option<GameOver> {
        self.game_over
    }

    #[must_use]
    pub fn snake(&self) -> &SnakePlayer {
        &self.round.snake
    }

    #[must_use]
    pub fn food(&self) -> Point {
        self.round.food
    }

    #[must_use]
    pub fn speed_ms(&self) -> u64 {
        self.round.speed.current()
    }

    #[must_use]
    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.ticker.active()
    }

    #[must_use]
    pub fn get_grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn get_params(&self) -> &SnakeParams {
        &self.params
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Point) {
        self.round.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: SnakePlayer) {
        self.round.snake = snake;
    }
}
