/*
 * Unit tests for the elevator state machine
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_elevator_init
 * - test_start_trip_heads_towards_pickup
 * - test_start_trip_at_pickup_floor
 * - test_update_at_floor
 * - test_update_at_floor_leaving_building
 * - test_add_passenger_capacity_rejection
 * - test_drop_passengers
 * - test_invariants_reject_boarding_before_admission
 * - test_pick_up_floor_only_tightens
 * - test_turns_at_pickup_bound
 * - test_go_idle
 *
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod fsm_tests {
    use crate::elevator::Elevator;
    use crate::shared::Direction::{Down, Up};
    use crate::shared::Status::{Idle, InUse};
    use crate::shared::{Passenger, SimulationError};

    fn setup_elevator() -> Elevator {
        // Default configuration
        Elevator::new(0, 10, 2)
    }

    #[test]
    fn test_elevator_init() {
        // Purpose: Verify that a new elevator waits idle at the ground floor

        // Arrange
        let elevator = setup_elevator();

        // Assert
        assert_eq!(elevator.status(), Idle);
        assert_eq!(elevator.at_floor(), 1);
        assert_eq!(elevator.direction(), None);
        assert_eq!(elevator.passenger_direction(), None);
        assert_eq!(elevator.passenger_count(), 0);
        assert!(elevator.check_invariants().is_ok());
    }

    #[test]
    fn test_start_trip_heads_towards_pickup() {
        // Purpose: Verify that an idle elevator moves toward a pickup below it, serving UP

        // Arrange
        let mut elevator = setup_elevator();
        elevator.test_set_floor(8);

        // Act
        elevator.start_trip(3, Up);

        // Assert
        assert_eq!(elevator.status(), InUse);
        assert_eq!(elevator.direction(), Some(Down));
        assert_eq!(elevator.passenger_direction(), Some(Up));
        assert_eq!(elevator.pickup_floor_bound(), 3);
        assert!(!elevator.is_sweeping());
    }

    #[test]
    fn test_start_trip_at_pickup_floor() {
        // Purpose: Verify that a pickup at the current floor starts the sweep immediately

        // Arrange
        let mut elevator = setup_elevator();

        // Act
        elevator.start_trip(1, Up);

        // Assert
        assert_eq!(elevator.direction(), Some(Up));
        assert!(elevator.is_sweeping());
    }

    #[test]
    fn test_update_at_floor() {
        // Purpose: Verify one floor of motion per call, none when idle

        // Arrange
        let mut elevator = setup_elevator();

        // Act
        elevator.update_at_floor().unwrap();
        let idle_floor = elevator.at_floor();
        elevator.start_trip(4, Up);
        elevator.update_at_floor().unwrap();
        elevator.update_at_floor().unwrap();

        // Assert
        assert_eq!(idle_floor, 1);
        assert_eq!(elevator.at_floor(), 3);
    }

    #[test]
    fn test_update_at_floor_leaving_building() {
        // Purpose: Verify that moving past the top floor is an invariant violation

        // Arrange
        let mut elevator = setup_elevator();
        elevator.test_set_floor(10);
        elevator.start_trip(10, Up);

        // Act
        let result = elevator.update_at_floor();

        // Assert
        assert!(matches!(result, Err(SimulationError::InvariantViolation(_))));
        assert_eq!(elevator.at_floor(), 10);
    }

    #[test]
    fn test_add_passenger_capacity_rejection() {
        // Purpose: Verify that boarding a full elevator hands the passenger back untouched

        // Arrange
        let mut elevator = setup_elevator();
        elevator.start_trip(1, Up);

        // Act
        let first = elevator.add_passenger(Passenger::new("a", 1, 5, 0), 0);
        let second = elevator.add_passenger(Passenger::new("b", 1, 6, 0), 0);
        let third = elevator.add_passenger(Passenger::new("c", 1, 7, 0), 0);

        // Assert
        assert!(first.is_ok());
        assert!(second.is_ok());
        let rejected = third.unwrap_err().passenger;
        assert_eq!(rejected.id, "c");
        assert_eq!(rejected.pickup_time, None);
        assert_eq!(elevator.passenger_count(), 2);
        assert!(elevator.is_at_max_capacity());
        assert!(elevator.check_invariants().is_ok());
    }

    #[test]
    fn test_drop_passengers() {
        // Purpose: Verify that only passengers for the current floor leave, with their end time

        // Arrange
        let mut elevator = setup_elevator();
        elevator.start_trip(1, Up);
        elevator.add_passenger(Passenger::new("a", 1, 2, 0), 0).unwrap();
        elevator.add_passenger(Passenger::new("b", 1, 3, 0), 0).unwrap();

        // Act
        let at_first = elevator.drop_passengers(0);
        elevator.update_at_floor().unwrap();
        let at_second = elevator.drop_passengers(1);

        // Assert
        assert!(at_first.is_empty());
        assert_eq!(at_second.len(), 1);
        assert_eq!(at_second[0].id, "a");
        assert_eq!(at_second[0].pickup_time, Some(0));
        assert_eq!(at_second[0].end_time, Some(1));
        assert_eq!(elevator.passenger_count(), 1);
        assert!(elevator.onboard().contains_key(&3));
    }

    #[test]
    fn test_invariants_reject_boarding_before_admission() {
        // Purpose: Verify that an out-of-order pickup surfaces as an invariant violation

        // Arrange
        let mut elevator = setup_elevator();
        elevator.start_trip(1, Up);

        // Act
        elevator.add_passenger(Passenger::new("early", 1, 4, 5), 3).unwrap();

        // Assert
        assert!(matches!(
            elevator.check_invariants(),
            Err(SimulationError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_pick_up_floor_only_tightens() {
        // Purpose: Verify that the bound follows the min of an UP sweep and the max of a DOWN sweep

        // Arrange
        let mut up = setup_elevator();
        up.test_set_floor(9);
        up.start_trip(6, Up);
        let mut down = setup_elevator();
        down.start_trip(4, Down);

        // Act
        up.update_pick_up_floor(8);
        up.update_pick_up_floor(2);
        up.update_pick_up_floor(5);
        down.update_pick_up_floor(3);
        down.update_pick_up_floor(7);
        down.update_pick_up_floor(6);

        // Assert
        assert_eq!(up.pickup_floor_bound(), 2);
        assert_eq!(down.pickup_floor_bound(), 7);
    }

    #[test]
    fn test_turns_at_pickup_bound() {
        // Purpose: Verify that the elevator reverses into the passenger direction only at the bound

        // Arrange
        let mut elevator = setup_elevator();
        elevator.test_set_floor(5);
        elevator.start_trip(3, Up);

        // Act
        let before_bound = elevator.is_moving_in_pass_direction();
        elevator.update_at_floor().unwrap();
        elevator.update_at_floor().unwrap();
        let at_bound = elevator.is_moving_in_pass_direction();

        // Assert
        assert!(!before_bound);
        assert_eq!(elevator.at_floor(), 3);
        assert!(at_bound);
        assert_eq!(elevator.direction(), Some(Up));
    }

    #[test]
    fn test_go_idle() {
        // Purpose: Verify that going idle clears both directions

        // Arrange
        let mut elevator = setup_elevator();
        elevator.start_trip(6, Down);

        // Act
        elevator.go_idle();

        // Assert
        assert_eq!(elevator.status(), Idle);
        assert_eq!(elevator.direction(), None);
        assert_eq!(elevator.passenger_direction(), None);
        assert!(elevator.check_invariants().is_ok());
    }
}
