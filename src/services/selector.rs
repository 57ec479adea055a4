use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::models::Employee;

/// Pick one employee uniformly at random.
///
/// Every call is an independent draw; repeats between calls are expected.
pub fn pick_random<'a, R: Rng>(rng: &mut R, pool: &'a [Employee]) -> AppResult<&'a Employee> {
    if pool.is_empty() {
        return Err(AppError::EmptyPool);
    }
    let index = rng.random_range(0..pool.len());
    Ok(&pool[index])
}
