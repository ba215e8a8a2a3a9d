use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_view_reports_buffer_length_and_pointer() {
    let mut data = [0.0f64; 5];
    for (i, value) in data.iter_mut().enumerate() {
        *value = i as f64;
    }
    let ptr = data.as_ptr();

    let view = ArrayView1::new(&mut data);
    assert_eq!(view.len(), 5);
    assert_eq!(view.as_ptr(), ptr);

    let const_view: ConstArrayView1<'_, f64> = view.into();
    assert_eq!(const_view.len(), 5);
    assert_eq!(const_view.as_ptr(), ptr);
}

#[test]
fn test_view_iterates_in_index_order() {
    let mut array = Array1::from_vec(vec![6.0f32, 4.0, 1.0, -5.0]);
    let mut view = array.view();

    let mut visited = 0;
    for (i, value) in view.iter().enumerate() {
        assert_eq!(view[i], *value);
        visited += 1;
    }
    assert_eq!(visited, view.len());

    for value in &mut view {
        *value *= 2.0;
    }
    assert_eq!(array.as_slice(), &[12.0, 8.0, 2.0, -10.0]);

    let const_view = array.const_view();
    let collected: Vec<f32> = const_view.into_iter().copied().collect();
    assert_eq!(collected, vec![12.0, 8.0, 2.0, -10.0]);
}

#[test]
fn test_for_each_index_is_ascending() {
    let array = Array1::from_vec(vec![6.0f32, 4.0, 1.0, -5.0]);
    let mut expected = 0;
    for_each_index(array.len(), |i| {
        assert_eq!(i, expected);
        expected += 1;
    });
    assert_eq!(expected, 4);
}

#[test]
fn test_parallel_for_each_index_visits_each_index_once() {
    for n in [0usize, 1, 7, 200, 50_000] {
        let counts: Vec<AtomicUsize> = (0..n).map(|_| AtomicUsize::new(0)).collect();
        parallel_for_each_index(n, |i| {
            counts[i].fetch_add(1, Ordering::Relaxed);
        });
        assert!(counts.iter().all(|c| c.load(Ordering::Relaxed) == 1), "n = {}", n);
    }
}

#[test]
fn test_parallel_and_sequential_updates_agree() {
    for n in [0usize, 3, 200, 20_000] {
        let mut sequential = Array1::<f32>::new(n);
        for_each_index(n, |i| sequential[i] = 200.0 - i as f32);

        let mut parallel = Array1::<f32>::new(n);
        parallel.parallel_fill_with(|i| 200.0 - i as f32);

        assert_eq!(sequential, parallel);

        parallel_for_each_index(n, |i| {
            assert_eq!(parallel[i], 200.0 - i as f32);
        });
    }
}

#[test]
fn test_array2_row_major_layout() {
    let array = Array2::from_fn(Size2::new(3, 2), |i, j| (i * 10 + j) as i32);
    assert_eq!(array.as_slice(), &[0, 10, 20, 1, 11, 21]);
    assert_eq!(array[(2, 1)], 21);
    assert_eq!(array.get(3, 0), None);
    assert_eq!(array.get(0, 2), None);
}

#[test]
fn test_array2_parallel_fill_matches_from_fn() {
    let size = Size2::new(129, 65);
    let expected = Array2::from_fn(size, |i, j| (i as f64) * 0.5 - j as f64);

    let mut filled = Array2::<f64>::new(size);
    filled.parallel_fill_with(|i, j| (i as f64) * 0.5 - j as f64);
    assert_eq!(expected, filled);

    let mut visited = Vec::new();
    filled.for_each_index(|i, j| visited.push((i, j)));
    assert_eq!(visited.len(), size.area());
    assert_eq!(visited[0], (0, 0));
    assert_eq!(visited[1], (1, 0));
}

#[test]
fn test_array2_set_is_deep_copy() {
    let source = Array2::with_value(Size2::new(4, 4), 1.5f64);
    let mut dest = Array2::<f64>::new(Size2::new(2, 2));
    dest.set(&source);
    assert_eq!(dest, source);
    assert_ne!(dest.as_ptr(), source.as_ptr());
}

#[test]
fn test_array2_view_indexing() {
    let mut array = Array2::<i32>::new(Size2::new(2, 3));
    {
        let mut view = array.view();
        view[(1, 2)] = 7;
        assert_eq!(view.size(), Size2::new(2, 3));
    }
    let view = array.const_view();
    assert_eq!(view[(1, 2)], 7);
    assert_eq!(view.as_ptr(), array.as_ptr());
}

#[test]
#[should_panic(expected = "out of")]
fn test_view2_rejects_column_past_row_end() {
    let mut data: Vec<i32> = (0..9).collect();
    let view = ArrayView2::new(&mut data, Size2::new(3, 3));
    let _ = view[(3, 0)];
}

#[test]
#[should_panic(expected = "out of")]
fn test_view2_mut_rejects_column_past_row_end() {
    let mut data: Vec<i32> = (0..9).collect();
    let mut view = ArrayView2::new(&mut data, Size2::new(3, 3));
    view[(3, 1)] = -1;
}

#[test]
#[should_panic(expected = "out of")]
fn test_const_view2_rejects_column_past_row_end() {
    let data: Vec<i32> = (0..6).collect();
    let view = ConstArrayView2::new(&data, Size2::new(2, 3));
    let _ = view[(2, 0)];
}
