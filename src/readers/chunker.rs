use std::ops::Range;

/// Partition `data` into at most `worker_count` contiguous ranges that each
/// begin at a record start.
///
/// Naive boundaries at `i * len / worker_count` are moved forward to just past
/// the next terminator. Boundaries that would produce an empty chunk are
/// dropped, so small inputs yield fewer chunks and empty input yields none.
/// The final chunk runs to the end of `data` whether or not it ends in a
/// terminator.
pub fn plan_chunks(data: &[u8], worker_count: usize, terminator: u8) -> Vec<Range<usize>> {
    let len = data.len();
    if len == 0 {
        return Vec::new();
    }

    let workers = worker_count.clamp(1, len);
    let mut chunks = Vec::with_capacity(workers);
    let mut start = 0;

    for i in 1..workers {
        let naive = i * len / workers;
        if naive <= start {
            continue;
        }

        let boundary = match next_record_start(data, naive, terminator) {
            Some(boundary) => boundary,
            None => break,
        };
        if boundary <= start {
            continue;
        }
        if boundary >= len {
            break;
        }

        chunks.push(start..boundary);
        start = boundary;
    }

    chunks.push(start..len);
    chunks
}

/// First record start at or after `offset`, i.e. one past the terminator that
/// closes the record containing `offset - 1`
fn next_record_start(data: &[u8], offset: usize, terminator: u8) -> Option<usize> {
    data[offset - 1..]
        .iter()
        .position(|&b| b == terminator)
        .map(|pos| offset + pos)
}
