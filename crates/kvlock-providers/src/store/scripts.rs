//! Lua bodies for the four atomic lock operations
//!
//! Each script runs server-side as one indivisible unit, which is the
//! only thing keeping racing clients from observing partial state.
//! KEYS[1] is always the lock key; ARGV[1] the caller's token.

/// Create the record and its expiry in one step, only if absent.
/// ARGV[2]: lease in milliseconds. Returns 1 if acquired.
pub const ACQUIRE_SCRIPT: &str = r"
if redis.call('setnx', KEYS[1], ARGV[1]) == 1 then
    redis.call('pexpire', KEYS[1], ARGV[2])
    return 1
else
    return 0
end
";

/// Delete the record only when the caller still holds it.
/// Returns 1 if released.
pub const RELEASE_SCRIPT: &str = r"
if redis.call('get', KEYS[1]) == ARGV[1] then
    return redis.call('del', KEYS[1])
else
    return 0
end
";

/// Add ARGV[2] milliseconds on top of the remaining lease. A negative
/// PTTL means no active lease, which must not become extendable.
/// Returns 1 if extended.
pub const EXTEND_SCRIPT: &str = r"
if redis.call('get', KEYS[1]) ~= ARGV[1] then
    return 0
end
local remaining = redis.call('pttl', KEYS[1])
if remaining < 0 then
    return 0
end
redis.call('pexpire', KEYS[1], remaining + ARGV[2])
return 1
";

/// Replace the remaining lease with exactly ARGV[2] milliseconds.
/// Same holder and finite-lease preconditions as extend.
/// Returns 1 if renewed.
pub const RENEW_SCRIPT: &str = r"
if redis.call('get', KEYS[1]) ~= ARGV[1] or redis.call('pttl', KEYS[1]) < 0 then
    return 0
end
redis.call('pexpire', KEYS[1], ARGV[2])
return 1
";
